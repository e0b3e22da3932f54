//! Document Repository
//!
//! Keyed JSON documents for the parts of the homepage that are not ordered
//! collections. A missing document reads back as its default.

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use site_content::{DigitalHeader, PlsAdvantage, SectionImages, SectionKind};

use super::db::SharedConnection;
use crate::domain::{DomainError, DomainResult};

pub const PLS_ADVANTAGE_KEY: &str = "pls-advantage";
pub const DIGITAL_HEADER_KEY: &str = "quality-digital/header";

pub fn images_key(section: SectionKind) -> String {
    format!("section-images/{}", section.as_str())
}

pub(super) fn read_document<T: DeserializeOwned + Default>(
    conn: &Connection,
    key: &str,
) -> DomainResult<T> {
    let payload: Option<String> = conn
        .query_row(
            "SELECT payload FROM documents WHERE key = ?",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    match payload {
        Some(json) => Ok(serde_json::from_str(&json)?),
        None => Ok(T::default()),
    }
}

pub(super) fn write_document<T: Serialize>(
    conn: &Connection,
    key: &str,
    value: &T,
) -> DomainResult<()> {
    let json = serde_json::to_string(value)?;
    conn.execute(
        "INSERT INTO documents (key, payload, updated_at) VALUES (?1, ?2, ?3)
         ON CONFLICT(key) DO UPDATE SET payload = excluded.payload, updated_at = excluded.updated_at",
        params![key, json, chrono::Utc::now().timestamp_millis()],
    )?;
    Ok(())
}

/// SQLite-backed singleton documents
pub struct DocumentRepository {
    conn: SharedConnection,
}

impl DocumentRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn section_images(&self, section: SectionKind) -> DomainResult<SectionImages> {
        let conn = self.conn.lock().await;
        read_document(&conn, &images_key(section))
    }

    pub async fn save_section_images(
        &self,
        section: SectionKind,
        images: &SectionImages,
    ) -> DomainResult<SectionImages> {
        if !section.has_image_pair() {
            return Err(DomainError::invalid(
                "section",
                format!("{} has no image pair", section),
            ));
        }
        let conn = self.conn.lock().await;
        write_document(&conn, &images_key(section), images)?;
        read_document(&conn, &images_key(section))
    }

    pub async fn pls_advantage(&self) -> DomainResult<PlsAdvantage> {
        let conn = self.conn.lock().await;
        read_document(&conn, PLS_ADVANTAGE_KEY)
    }

    pub async fn save_pls_advantage(&self, advantage: &PlsAdvantage) -> DomainResult<PlsAdvantage> {
        advantage.validate()?;
        let conn = self.conn.lock().await;
        write_document(&conn, PLS_ADVANTAGE_KEY, advantage)?;
        read_document(&conn, PLS_ADVANTAGE_KEY)
    }

    pub async fn digital_header(&self) -> DomainResult<DigitalHeader> {
        let conn = self.conn.lock().await;
        read_document(&conn, DIGITAL_HEADER_KEY)
    }
}
