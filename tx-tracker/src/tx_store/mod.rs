//! Transaction Store Subsystem
//!
//! Durable, ordered collection of transaction records.
//!
//! ## Flow
//! 1. the runner registers a pending record with `create`
//! 2. `update` advances the record at each lifecycle milestone
//! 3. consumers read via `get` / `get_by_owner` / `read_all` and follow
//!    the change feed via `subscribe`
//!
//! Every write persists the full collection through the injected storage
//! backend before subscribers are notified, so a restart mid-flight
//! resumes from the last observed state. Records are never deleted here;
//! retention is a consumer concern.

mod manager;

pub use manager::{NewTransaction, StoreEvent, TransactionStore, TransactionUpdate};
