//! Transaction store manager
//!
//! Owns the record collection, the persistence backend and the change
//! feed.

use ethers::types::{Transaction, TransactionReceipt};
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::events::SubscriberHub;
use crate::persistence::StorageBackend;
use tx_tracker_types::{ConfirmationStatus, LifecycleState, TransactionRecord};

/// Fields for registering a new record. Everything else starts at the
/// default initial state.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub id: String,
    pub label: String,
    pub chain_id: u64,
    pub owner_address: String,
}

/// Partial update for an existing record: every provided field
/// overwrites, every omitted field is preserved.
#[derive(Debug, Clone, Default)]
pub struct TransactionUpdate {
    pub id: String,
    pub lifecycle_state: Option<LifecycleState>,
    pub confirmation_status: Option<ConfirmationStatus>,
    pub submission_handle: Option<Transaction>,
    pub confirmation_receipt: Option<TransactionReceipt>,
}

/// Change-feed message carrying a clone of the affected record.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Created(TransactionRecord),
    Updated(TransactionRecord),
}

impl StoreEvent {
    pub fn record(&self) -> &TransactionRecord {
        match self {
            StoreEvent::Created(r) | StoreEvent::Updated(r) => r,
        }
    }
}

/// Ordered, persisted collection of transaction records.
///
/// Constructed once at startup and shared by `Arc`. The store is
/// single-writer-per-process; concurrent processes sharing one backing
/// slot are not reconciled (last writer wins).
pub struct TransactionStore {
    records: Mutex<Vec<TransactionRecord>>,
    backend: Box<dyn StorageBackend>,
    changes: SubscriberHub<StoreEvent>,
}

impl TransactionStore {
    /// Open the store over `backend`, resuming from whatever collection
    /// it last persisted.
    pub fn open(backend: Box<dyn StorageBackend>) -> Result<Self, String> {
        let records = backend.load()?;
        log::info!(
            "[TxStore] Loaded {} transaction(s) from {} storage",
            records.len(),
            backend.backend_name()
        );
        Ok(Self {
            records: Mutex::new(records),
            backend,
            changes: SubscriberHub::new(),
        })
    }

    /// Append a new record in the initial state.
    ///
    /// Ids are generated by the runner, so a duplicate is a programming
    /// error: logged and ignored, collection untouched.
    pub fn create(&self, new: NewTransaction) {
        let record = {
            let mut records = self.records.lock();
            if records.iter().any(|r| r.id == new.id) {
                log::error!(
                    "[TxStore] Duplicate transaction id {}, ignoring create",
                    new.id
                );
                return;
            }
            let record =
                TransactionRecord::new(new.id, new.label, new.chain_id, new.owner_address);
            log::info!(
                "[TxStore] Tracking '{}' ({}) for {}",
                record.label,
                record.id,
                record.owner_address
            );
            records.push(record.clone());
            self.persist(&records);
            record
        };
        self.changes.emit(StoreEvent::Created(record));
    }

    /// Merge `update` into the record it names. An unknown id is a logged
    /// no-op.
    pub fn update(&self, update: TransactionUpdate) {
        let updated = {
            let mut records = self.records.lock();
            let Some(record) = records.iter_mut().find(|r| r.id == update.id) else {
                log::warn!(
                    "[TxStore] Update for unknown transaction {}, ignoring",
                    update.id
                );
                return;
            };
            if let Some(state) = update.lifecycle_state {
                record.lifecycle_state = state;
            }
            if let Some(status) = update.confirmation_status {
                log::info!("[TxStore] Transaction {} is now {}", record.id, status);
                record.confirmation_status = status;
            }
            if let Some(handle) = update.submission_handle {
                record.submission_handle = Some(handle);
            }
            if let Some(receipt) = update.confirmation_receipt {
                record.confirmation_receipt = Some(receipt);
            }
            let snapshot = record.clone();
            self.persist(&records);
            snapshot
        };
        self.changes.emit(StoreEvent::Updated(updated));
    }

    /// Snapshot of the full collection, insertion order.
    pub fn read_all(&self) -> Vec<TransactionRecord> {
        self.records.lock().clone()
    }

    /// Point lookup by id.
    pub fn get(&self, id: &str) -> Option<TransactionRecord> {
        self.records.lock().iter().find(|r| r.id == id).cloned()
    }

    /// All records for one account, insertion order. Address comparison
    /// is case-insensitive (EVM addresses are checksum-cased).
    pub fn get_by_owner(&self, owner_address: &str) -> Vec<TransactionRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.owner_address.eq_ignore_ascii_case(owner_address))
            .cloned()
            .collect()
    }

    /// Follow the change feed. Events fire after the collection has been
    /// persisted.
    pub fn subscribe(&self) -> (String, mpsc::Receiver<StoreEvent>) {
        self.changes.subscribe()
    }

    pub fn unsubscribe(&self, subscriber_id: &str) {
        self.changes.unsubscribe(subscriber_id);
    }

    fn persist(&self, records: &[TransactionRecord]) {
        if let Err(e) = self.backend.save(records) {
            log::error!("[TxStore] Failed to persist transactions: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryBackend;

    fn new_tx(id: &str, owner: &str) -> NewTransaction {
        NewTransaction {
            id: id.to_string(),
            label: "Delegate deposit".to_string(),
            chain_id: 137,
            owner_address: owner.to_string(),
        }
    }

    fn open_store() -> (TransactionStore, MemoryBackend) {
        let backend = MemoryBackend::new();
        let store = TransactionStore::open(Box::new(backend.clone())).unwrap();
        (store, backend)
    }

    #[test]
    fn test_create_and_get() {
        let (store, _) = open_store();
        store.create(new_tx("tx-1", "0xabc"));

        let record = store.get("tx-1").unwrap();
        assert_eq!(record.confirmation_status, ConfirmationStatus::AwaitingUserSignature);
        assert_eq!(record.lifecycle_state, LifecycleState::Pending);
        assert!(store.get("tx-2").is_none());
    }

    #[test]
    fn test_duplicate_id_is_ignored() {
        let (store, _) = open_store();
        store.create(new_tx("tx-1", "0xabc"));
        store.update(TransactionUpdate {
            id: "tx-1".to_string(),
            confirmation_status: Some(ConfirmationStatus::AwaitingChainConfirmation),
            ..Default::default()
        });

        store.create(new_tx("tx-1", "0xother"));

        let all = store.read_all();
        assert_eq!(all.len(), 1);
        // The original record survives untouched
        assert_eq!(all[0].owner_address, "0xabc");
        assert_eq!(
            all[0].confirmation_status,
            ConfirmationStatus::AwaitingChainConfirmation
        );
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let (store, _) = open_store();
        store.create(new_tx("tx-1", "0xabc"));

        store.update(TransactionUpdate {
            id: "missing".to_string(),
            lifecycle_state: Some(LifecycleState::Complete),
            ..Default::default()
        });

        assert_eq!(store.read_all().len(), 1);
        assert!(store.get("tx-1").unwrap().in_flight());
    }

    #[test]
    fn test_update_preserves_omitted_fields() {
        let (store, _) = open_store();
        store.create(new_tx("tx-1", "0xabc"));

        store.update(TransactionUpdate {
            id: "tx-1".to_string(),
            confirmation_status: Some(ConfirmationStatus::AwaitingChainConfirmation),
            submission_handle: Some(Default::default()),
            ..Default::default()
        });
        store.update(TransactionUpdate {
            id: "tx-1".to_string(),
            lifecycle_state: Some(LifecycleState::Complete),
            confirmation_status: Some(ConfirmationStatus::Succeeded),
            ..Default::default()
        });

        let record = store.get("tx-1").unwrap();
        // The handle set by the earlier update is still there
        assert!(record.submission_handle.is_some());
        assert_eq!(record.confirmation_status, ConfirmationStatus::Succeeded);
        assert!(record.lifecycle_state.is_complete());
    }

    #[test]
    fn test_owner_filter_and_insertion_order() {
        let (store, _) = open_store();
        store.create(new_tx("tx-1", "0xAbC"));
        store.create(new_tx("tx-2", "0xdef"));
        store.create(new_tx("tx-3", "0xabc"));

        let mine = store.get_by_owner("0xabc");
        assert_eq!(mine.len(), 2);
        assert_eq!(mine[0].id, "tx-1");
        assert_eq!(mine[1].id, "tx-3");

        // Idempotent without intervening writes
        assert_eq!(store.get_by_owner("0xabc"), mine);
    }

    #[test]
    fn test_every_write_is_persisted() {
        let (store, backend) = open_store();
        store.create(new_tx("tx-1", "0xabc"));
        assert_eq!(backend.load().unwrap().len(), 1);

        store.update(TransactionUpdate {
            id: "tx-1".to_string(),
            confirmation_status: Some(ConfirmationStatus::CancelledByUser),
            lifecycle_state: Some(LifecycleState::Complete),
            ..Default::default()
        });
        let persisted = backend.load().unwrap();
        assert_eq!(
            persisted[0].confirmation_status,
            ConfirmationStatus::CancelledByUser
        );
    }

    #[test]
    fn test_reopen_resumes_collection() {
        let (store, backend) = open_store();
        store.create(new_tx("tx-1", "0xabc"));
        store.create(new_tx("tx-2", "0xdef"));
        let before = store.read_all();
        drop(store);

        let store = TransactionStore::open(Box::new(backend)).unwrap();
        assert_eq!(store.read_all(), before);
    }

    #[test]
    fn test_change_feed() {
        let (store, _) = open_store();
        let (_id, mut rx) = store.subscribe();

        store.create(new_tx("tx-1", "0xabc"));
        store.update(TransactionUpdate {
            id: "tx-1".to_string(),
            confirmation_status: Some(ConfirmationStatus::AwaitingChainConfirmation),
            ..Default::default()
        });

        match rx.try_recv().unwrap() {
            StoreEvent::Created(r) => assert_eq!(r.id, "tx-1"),
            other => panic!("expected Created, got {:?}", other),
        }
        match rx.try_recv().unwrap() {
            StoreEvent::Updated(r) => {
                assert_eq!(r.confirmation_status, ConfirmationStatus::AwaitingChainConfirmation)
            }
            other => panic!("expected Updated, got {:?}", other),
        }
    }
}
