//! JSON-file backend: the whole collection as one self-describing
//! document, the same shape the browser front-end keeps in local storage.

use std::path::{Path, PathBuf};

use super::StorageBackend;
use tx_tracker_types::TransactionRecord;

pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<TransactionRecord>, String> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        serde_json::from_str(&json)
            .map_err(|e| format!("Corrupt transaction file {}: {}", self.path.display(), e))
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create storage dir: {}", e))?;
        }
        let json = serde_json::to_string(records)
            .map_err(|e| format!("Failed to serialize transactions: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }

    fn backend_name(&self) -> &'static str {
        "json"
    }
}
