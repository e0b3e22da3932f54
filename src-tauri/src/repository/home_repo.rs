//! Homepage Aggregate
//!
//! Assembles the whole homepage document from one consistent read.

use site_content::{HomePage, SectionKind};

use super::db::SharedConnection;
use super::document_repo::{images_key, read_document, PLS_ADVANTAGE_KEY};
use super::section_repo::load_section;
use crate::domain::DomainResult;

pub struct HomeRepository {
    conn: SharedConnection,
}

impl HomeRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn load(&self) -> DomainResult<HomePage> {
        let conn = self.conn.lock().await;
        let mut home = HomePage::default();

        for section in SectionKind::ALL {
            load_section(&conn, section)?.apply_to(&mut home);
            if section.has_image_pair() {
                home.set_images(section, read_document(&conn, &images_key(section))?);
            }
        }
        home.pls_advantage = read_document(&conn, PLS_ADVANTAGE_KEY)?;

        Ok(home)
    }
}
