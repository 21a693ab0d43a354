//! In-memory backend for tests and ephemeral sessions.

use parking_lot::Mutex;
use std::sync::Arc;

use super::StorageBackend;
use tx_tracker_types::TransactionRecord;

/// Clones share the same underlying slot, so a test can keep a handle and
/// inspect what the store persisted.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Mutex<Vec<TransactionRecord>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<TransactionRecord>, String> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[TransactionRecord]) -> Result<(), String> {
        *self.records.lock() = records.to_vec();
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
