//! # Studio Database
//!
//! Single SQLite database for studio persistence at `.studio/studio.db`.
//! Session history is stored as one JSON document in a fixed single-row
//! table, the durable analogue of a fixed key-value storage slot.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Schema version for migrations
const SCHEMA_VERSION: i32 = 1;

/// Database manager for studio state
pub struct StudioDb {
    conn: Arc<Mutex<Connection>>,
}

impl StudioDb {
    /// Open or create the database at `.studio/studio.db`
    pub fn open() -> Result<Self> {
        Self::open_at(".studio/studio.db")
    }

    /// Open database at a specific path (useful for testing)
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path.as_ref()).context("Failed to open studio database")?;

        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };

        db.run_migrations()?;

        Ok(db)
    }

    /// Run schema migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            [],
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current_version < 1 {
            // Session history (single row with a JSON array document)
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS session_history (
                    id INTEGER PRIMARY KEY CHECK (id = 1),
                    data TEXT NOT NULL DEFAULT '[]'
                )
                "#,
                [],
            )?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                [1],
            )?;

            tracing::info!("StudioDb initialized with schema version {}", SCHEMA_VERSION);
        }

        Ok(())
    }

    /// Read the stored history document, if one was ever written
    pub fn read_history_json(&self) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let result: Option<String> = conn
            .query_row("SELECT data FROM session_history WHERE id = 1", [], |row| {
                row.get(0)
            })
            .ok();

        Ok(result)
    }

    /// Replace the stored history document
    pub fn write_history_json(&self, data: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        conn.execute(
            "INSERT OR REPLACE INTO session_history (id, data) VALUES (1, ?1)",
            params![data],
        )
        .context("Failed to save session history")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_studio_db_open_creates_tables() {
        let path = ".studio/test_studio.db";
        let _ = fs::remove_file(path);

        let db = StudioDb::open_at(path).unwrap();

        // Nothing written yet
        assert_eq!(db.read_history_json().unwrap(), None);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_schema_version_tracking() {
        let path = ".studio/test_studio_version.db";
        let _ = fs::remove_file(path);

        // Open twice - should not fail on second open
        let db1 = StudioDb::open_at(path).unwrap();
        db1.write_history_json("[]").unwrap();
        drop(db1);

        let db2 = StudioDb::open_at(path).unwrap();
        assert_eq!(db2.read_history_json().unwrap(), Some("[]".to_string()));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_history_document_round_trip() {
        let path = ".studio/test_studio_doc.db";
        let _ = fs::remove_file(path);

        let db = StudioDb::open_at(path).unwrap();
        db.write_history_json(r#"[{"id":"abc"}]"#).unwrap();
        assert_eq!(
            db.read_history_json().unwrap(),
            Some(r#"[{"id":"abc"}]"#.to_string())
        );

        // Overwrite replaces, not appends
        db.write_history_json("[]").unwrap();
        assert_eq!(db.read_history_json().unwrap(), Some("[]".to_string()));

        let _ = fs::remove_file(path);
    }
}
