//! Database Connection and Setup
//!
//! Opens the SQLite database and runs migrations. All repositories share
//! one connection behind an async mutex, so writes are serialized.

use std::path::Path;
use std::sync::Arc;

use rusqlite::Connection;
use tokio::sync::Mutex;

use crate::domain::DomainResult;

/// Connection handle shared by every repository
pub type SharedConnection = Arc<Mutex<Connection>>;

/// Open (creating if needed) the database at `db_path`
pub fn init_db(db_path: &Path) -> DomainResult<SharedConnection> {
    let conn = Connection::open(db_path)?;
    prepare(conn)
}

/// Fresh in-memory database with the full schema
pub fn init_memory_db() -> DomainResult<SharedConnection> {
    prepare(Connection::open_in_memory()?)
}

fn prepare(conn: Connection) -> DomainResult<SharedConnection> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    run_migrations(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    // One row per record of an ordered section; position is the order
    conn.execute(
        "CREATE TABLE IF NOT EXISTS section_items (
            id TEXT NOT NULL,
            section TEXT NOT NULL,
            position INTEGER NOT NULL,
            payload TEXT NOT NULL,
            updated_at INTEGER NOT NULL,
            PRIMARY KEY (section, id)
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_section_items_position ON section_items(section, position)",
        [],
    )?;

    // Singleton documents: image pairs, advantage block, digital header
    conn.execute(
        "CREATE TABLE IF NOT EXISTS documents (
            key TEXT PRIMARY KEY,
            payload TEXT NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS submissions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            kind TEXT NOT NULL,
            payload TEXT NOT NULL,
            created_at TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS attachments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            submission_id INTEGER NOT NULL REFERENCES submissions(id) ON DELETE CASCADE,
            file_name TEXT NOT NULL,
            size_bytes INTEGER NOT NULL,
            content_hash TEXT NOT NULL,
            stored_path TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_attachments_submission ON attachments(submission_id)",
        [],
    )?;

    Ok(())
}
