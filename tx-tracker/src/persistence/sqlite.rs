//! Embedded SQLite backend: one keyed slot holding the serialized
//! collection.

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use super::StorageBackend;
use tx_tracker_types::TransactionRecord;

pub struct SqliteBackend {
    conn: Mutex<Connection>,
    slot: String,
}

impl SqliteBackend {
    /// Open or create the database at `path`. Creates parent dirs if
    /// needed.
    pub fn open(path: impl AsRef<Path>, slot: &str) -> Result<Self, String> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create storage dir: {}", e))?;
        }

        let conn = Connection::open(path).map_err(|e| format!("Failed to open sqlite: {}", e))?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tracker_slots (
                slot TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )
        .map_err(|e| format!("Failed to initialize tracker_slots: {}", e))?;

        Ok(Self {
            conn: Mutex::new(conn),
            slot: slot.to_string(),
        })
    }
}

impl StorageBackend for SqliteBackend {
    fn load(&self) -> Result<Vec<TransactionRecord>, String> {
        let conn = self.conn.lock();
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM tracker_slots WHERE slot = ?1",
                [&self.slot],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| format!("Failed to read slot '{}': {}", self.slot, e))?;

        match value {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| format!("Corrupt slot '{}': {}", self.slot, e)),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<(), String> {
        let json = serde_json::to_string(records)
            .map_err(|e| format!("Failed to serialize transactions: {}", e))?;

        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO tracker_slots (slot, value, updated_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![self.slot, json, Utc::now().to_rfc3339()],
        )
        .map_err(|e| format!("Failed to write slot '{}': {}", self.slot, e))?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}
