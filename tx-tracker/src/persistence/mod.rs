//! Pluggable persistence for the transaction collection.
//!
//! The store persists the full ordered collection on every write, so a
//! restart mid-flight resumes from the last observed state. Backends hold
//! one named slot; nothing reconciles concurrent writers to the same slot
//! (last writer wins).

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::config::Config;
use tx_tracker_types::TransactionRecord;

/// Durable storage seam for the full ordered collection.
pub trait StorageBackend: Send + Sync {
    /// Load the last persisted collection. An empty slot yields an empty
    /// list, not an error.
    fn load(&self) -> Result<Vec<TransactionRecord>, String>;

    /// Replace the persisted collection with `records`.
    fn save(&self, records: &[TransactionRecord]) -> Result<(), String>;

    /// Backend name for logging.
    fn backend_name(&self) -> &'static str;
}

/// Create the storage backend selected by `TRACKER_STORAGE_BACKEND`.
///
/// - `sqlite` (default): single-slot table in an embedded SQLite file
/// - `json`: single JSON document on disk
pub fn create_storage_backend(config: &Config) -> Result<Box<dyn StorageBackend>, String> {
    let backend = config.storage_backend.to_lowercase();
    log::info!("[Persistence] Initializing {} storage backend", backend);

    match backend.as_str() {
        "sqlite" => {
            let backend = SqliteBackend::open(&config.storage_path, &config.storage_slot)?;
            Ok(Box::new(backend))
        }
        "json" => Ok(Box::new(JsonFileBackend::new(&config.storage_path))),
        _ => Err(format!(
            "Unknown TRACKER_STORAGE_BACKEND '{}'. Use 'sqlite' or 'json'.",
            backend
        )),
    }
}
