//! Submission Repository
//!
//! Intake submissions with their stored attachments.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use site_content::{Submission, SubmissionKind};

use super::db::SharedConnection;
use super::traits::Repository;
use crate::domain::{DomainError, DomainResult, StoredAttachment, StoredSubmission};

fn row_to_submission(row: &Row) -> rusqlite::Result<(i64, String, String)> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
}

fn attachments_for(conn: &Connection, submission_id: i64) -> DomainResult<Vec<StoredAttachment>> {
    let mut stmt = conn.prepare(
        "SELECT id, file_name, size_bytes, content_hash, stored_path
         FROM attachments WHERE submission_id = ? ORDER BY id",
    )?;
    let rows = stmt.query_map(params![submission_id], |row| {
        Ok(StoredAttachment {
            id: row.get(0)?,
            file_name: row.get(1)?,
            size_bytes: row.get::<_, i64>(2)? as u64,
            content_hash: row.get(3)?,
            stored_path: row.get(4)?,
        })
    })?;
    let attachments = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(attachments)
}

fn hydrate(
    conn: &Connection,
    (id, payload, created_at): (i64, String, String),
) -> DomainResult<StoredSubmission> {
    let submission: Submission = serde_json::from_str(&payload)?;
    Ok(StoredSubmission {
        id,
        submission,
        created_at,
        attachments: attachments_for(conn, id)?,
    })
}

fn query_submissions(
    conn: &Connection,
    kind: Option<SubmissionKind>,
) -> DomainResult<Vec<StoredSubmission>> {
    let raw = match kind {
        Some(kind) => {
            let mut stmt = conn.prepare(
                "SELECT id, payload, created_at FROM submissions WHERE kind = ? ORDER BY id DESC",
            )?;
            let rows = stmt.query_map(params![kind.as_str()], row_to_submission)?;
            let raw = rows.collect::<Result<Vec<_>, _>>()?;
            raw
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT id, payload, created_at FROM submissions ORDER BY id DESC")?;
            let rows = stmt.query_map([], row_to_submission)?;
            let raw = rows.collect::<Result<Vec<_>, _>>()?;
            raw
        }
    };
    raw.into_iter().map(|row| hydrate(conn, row)).collect()
}

/// SQLite implementation of the submission store
pub struct SubmissionRepository {
    conn: SharedConnection,
}

impl SubmissionRepository {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    /// Newest first, optionally narrowed to one kind
    pub async fn list_by_kind(&self, kind: Option<SubmissionKind>) -> DomainResult<Vec<StoredSubmission>> {
        let conn = self.conn.lock().await;
        query_submissions(&conn, kind)
    }
}

#[async_trait]
impl Repository<StoredSubmission> for SubmissionRepository {
    async fn create(&self, entity: &StoredSubmission) -> DomainResult<StoredSubmission> {
        let payload = serde_json::to_string(&entity.submission)?;
        let mut conn = self.conn.lock().await;
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO submissions (kind, payload, created_at) VALUES (?1, ?2, ?3)",
            params![entity.submission.kind().as_str(), payload, entity.created_at],
        )?;
        let id = tx.last_insert_rowid();

        for attachment in &entity.attachments {
            tx.execute(
                "INSERT INTO attachments (submission_id, file_name, size_bytes, content_hash, stored_path)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    id,
                    attachment.file_name,
                    attachment.size_bytes as i64,
                    attachment.content_hash,
                    attachment.stored_path
                ],
            )?;
        }

        let created = hydrate(&tx, (id, payload, entity.created_at.clone()))?;
        tx.commit()?;
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<StoredSubmission>> {
        let conn = self.conn.lock().await;
        let raw = conn
            .query_row(
                "SELECT id, payload, created_at FROM submissions WHERE id = ?",
                params![id],
                row_to_submission,
            )
            .optional()?;
        raw.map(|row| hydrate(&conn, row)).transpose()
    }

    async fn list(&self) -> DomainResult<Vec<StoredSubmission>> {
        let conn = self.conn.lock().await;
        query_submissions(&conn, None)
    }

    async fn delete(&self, id: i64) -> DomainResult<()> {
        let conn = self.conn.lock().await;
        let removed = conn.execute("DELETE FROM submissions WHERE id = ?", params![id])?;
        if removed == 0 {
            return Err(DomainError::NotFound(format!("submission {}", id)));
        }
        Ok(())
    }
}
