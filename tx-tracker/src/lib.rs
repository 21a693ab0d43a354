//! Client-side transaction lifecycle tracking for an EVM lending-pool
//! front-end.
//!
//! Two layers compose the crate:
//!
//! - [`tx_store::TransactionStore`] — a durable, ordered collection of
//!   transaction records, persisted through a pluggable
//!   [`persistence::StorageBackend`] and observable through a change feed.
//! - [`runner::TransactionRunner`] — the orchestration that registers a
//!   record, invokes the caller-supplied signed submission, and drives the
//!   record from wallet-signature request through on-chain confirmation,
//!   firing lifecycle callbacks and transient notifications on the way.
//!
//! Consumers subscribe to the store (or the [`notify::Notifier`] side
//! channel) and re-read records by id or owner address as they change.

pub mod config;
pub mod events;
pub mod notify;
pub mod persistence;
pub mod runner;
pub mod submission;
pub mod tx_store;

pub use config::Config;
pub use notify::{Notification, NotificationKind, Notifier};
pub use persistence::{
    JsonFileBackend, MemoryBackend, SqliteBackend, StorageBackend, create_storage_backend,
};
pub use runner::{TransactionCallbacks, TransactionRunner, TxCallback};
pub use submission::{SignedSubmission, USER_DENIED_SIGNATURE};
pub use tx_store::{NewTransaction, StoreEvent, TransactionStore, TransactionUpdate};

pub use tx_tracker_types::{ConfirmationStatus, LifecycleState, TransactionRecord};
