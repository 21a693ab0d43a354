//! Transaction Runner Subsystem
//!
//! Drives one submitted transaction through its lifecycle.
//!
//! ## Flow
//! 1. `submit` registers a pending record and returns its id immediately
//! 2. the caller-supplied operation resolves once the signer approves
//!    (or fails if the signer rejects)
//! 3. the submission's confirmation future resolves once the chain
//!    includes the transaction; the receipt status decides success or
//!    failure
//!
//! Each milestone updates the store, emits a transient notification and
//! fires the matching lifecycle callback, in a fixed order, at most once
//! per submission.

mod callbacks;
mod driver;

pub use callbacks::{TransactionCallbacks, TxCallback};
pub use driver::TransactionRunner;
