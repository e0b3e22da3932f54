//! Section Repository
//!
//! Ordered sections stored one row per record. Saves replace the whole
//! section inside one transaction; the row position is the record order.

use std::collections::HashSet;

use rusqlite::{params, Connection};
use site_content::{SectionKind, SectionPayload, StoredRow};

use super::db::SharedConnection;
use super::document_repo::{read_document, write_document, DIGITAL_HEADER_KEY};
use crate::domain::{DomainError, DomainResult};

/// Fresh record id, unique per section
fn new_record_id(section: SectionKind, position: usize) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let seed = format!("{}:{}:{}", section, nanos, position);
    blake3::hash(seed.as_bytes()).to_hex()[..16].to_string()
}

fn load_rows(conn: &Connection, section: SectionKind) -> DomainResult<Vec<StoredRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, payload FROM section_items WHERE section = ? ORDER BY position, id",
    )?;
    let rows = stmt.query_map(params![section.as_str()], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;

    let mut stored = Vec::new();
    for row in rows {
        let (id, payload) = row?;
        stored.push(StoredRow {
            id: Some(id),
            body: serde_json::from_str(&payload)?,
        });
    }
    Ok(stored)
}

/// Read one section, applying the digital header when relevant
pub(super) fn load_section(conn: &Connection, section: SectionKind) -> DomainResult<SectionPayload> {
    let mut payload = SectionPayload::from_rows(section, load_rows(conn, section)?)?;
    if let SectionPayload::QualityDigital(digital) = &mut payload {
        digital.apply_header(read_document(conn, DIGITAL_HEADER_KEY)?);
    }
    Ok(payload)
}

/// Reindex a section to be sequential (0, 1, 2, ...)
fn reindex(conn: &Connection, section: SectionKind) -> DomainResult<()> {
    let ids: Vec<String> = {
        let mut stmt = conn.prepare(
            "SELECT id FROM section_items WHERE section = ? ORDER BY position, id",
        )?;
        let rows = stmt.query_map(params![section.as_str()], |row| row.get(0))?;
        let ids = rows.collect::<Result<Vec<String>, _>>()?;
        ids
    };

    let now = chrono::Utc::now().timestamp_millis();
    for (new_pos, id) in ids.iter().enumerate() {
        conn.execute(
            "UPDATE section_items SET position = ?, updated_at = ? WHERE section = ? AND id = ?",
            params![new_pos as i64, now, section.as_str(), id],
        )?;
    }
    Ok(())
}

/// SQLite implementation of section storage
pub struct SectionRepository {
    conn: SharedConnection,
}

impl SectionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub async fn load(&self, section: SectionKind) -> DomainResult<SectionPayload> {
        let conn = self.conn.lock().await;
        load_section(&conn, section)
    }

    /// Replace the stored section with `payload` and return what was stored.
    ///
    /// Records without an id get one; ids present in storage but absent from
    /// the payload are deleted.
    pub async fn replace_all(&self, mut payload: SectionPayload) -> DomainResult<SectionPayload> {
        payload.validate()?;
        payload.normalize();

        let section = payload.kind();
        let rows = payload.rows()?;

        let mut seen = HashSet::new();
        for id in rows.iter().filter_map(|row| row.id.as_deref()) {
            if !seen.insert(id) {
                return Err(DomainError::Conflict(format!(
                    "{} contains id {} more than once",
                    section, id
                )));
            }
        }

        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        tx.execute(
            "DELETE FROM section_items WHERE section = ?",
            params![section.as_str()],
        )?;

        let now = chrono::Utc::now().timestamp_millis();
        for (position, row) in rows.into_iter().enumerate() {
            let id = row
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| new_record_id(section, position));
            tx.execute(
                "INSERT INTO section_items (id, section, position, payload, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    section.as_str(),
                    position as i64,
                    serde_json::to_string(&row.body)?,
                    now
                ],
            )?;
        }

        if let SectionPayload::QualityDigital(digital) = &payload {
            write_document(&tx, DIGITAL_HEADER_KEY, &digital.header())?;
        }

        let stored = load_section(&tx, section)?;
        tx.commit()?;

        log::info!("replaced {} with {} records", section, stored.len());
        Ok(stored)
    }

    /// Delete one record and close the gap it leaves
    pub async fn delete_item(&self, section: SectionKind, id: &str) -> DomainResult<()> {
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;
        let removed = tx.execute(
            "DELETE FROM section_items WHERE section = ? AND id = ?",
            params![section.as_str(), id],
        )?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("{} item {}", section, id)));
        }
        reindex(&tx, section)?;
        tx.commit()?;
        Ok(())
    }
}
