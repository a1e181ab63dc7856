//! Key→string blob store over SQLite
//!
//! The journal persists everything as JSON strings under well-known keys
//! (`entries`, `chat_history`, `profile`). Consumers own encoding and
//! decoding; this layer only moves opaque strings. Migrations are managed
//! via `PRAGMA user_version`.

use crate::error::Result;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::PathBuf;
use std::sync::Mutex;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: single blob table
    r#"
    CREATE TABLE IF NOT EXISTS blobs (
        key        TEXT PRIMARY KEY,
        value      TEXT NOT NULL,
        updated_at DATETIME NOT NULL DEFAULT (datetime('now'))
    );
    "#,
];

/// Blob store handle (single connection behind a mutex)
pub struct BlobStore {
    conn: Mutex<Connection>,
}

impl BlobStore {
    /// Open or create a store at the given path
    pub fn open(path: &PathBuf) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // WAL mode keeps best-effort writes cheap
        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory store (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run all pending migrations
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let current_version: i32 = conn
            .query_row("PRAGMA user_version", [], |r| r.get(0))
            .unwrap_or(0);

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            let version = (i + 1) as i32;
            if version > current_version {
                tracing::info!(version, "Running blob store migration");
                conn.execute_batch(migration)?;
                conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
            }
        }

        Ok(())
    }

    /// Fetch a blob by key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row("SELECT value FROM blobs WHERE key = ?1", [key], |r| {
                r.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Insert or replace a blob
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO blobs (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a blob; no-op if the key is absent
    pub fn remove(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute("DELETE FROM blobs WHERE key = ?1", [key])?;
        Ok(())
    }
}
