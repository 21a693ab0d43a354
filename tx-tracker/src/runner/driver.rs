//! Submission orchestration: registers a record and drives it through
//! its lifecycle states on a detached task.

use std::future::Future;
use std::sync::Arc;

use ethers::types::{U64, U256};
use uuid::Uuid;

use super::callbacks::TransactionCallbacks;
use crate::notify::Notifier;
use crate::submission::{SignedSubmission, USER_DENIED_SIGNATURE};
use crate::tx_store::{NewTransaction, TransactionStore, TransactionUpdate};
use tx_tracker_types::{ConfirmationStatus, LifecycleState};

pub struct TransactionRunner {
    store: Arc<TransactionStore>,
    notifier: Arc<Notifier>,
}

impl TransactionRunner {
    pub fn new(store: Arc<TransactionStore>, notifier: Arc<Notifier>) -> Self {
        Self { store, notifier }
    }

    /// Submit a transaction and return its record id.
    ///
    /// The record is registered synchronously, so `store.get(&id)` is
    /// populated by the time this returns; the rest of the flow runs on a
    /// detached task. `submit_fn` performs the actual signed submission
    /// and resolves once the signer approves, or fails with a reason
    /// string if it rejects. Must be called within a Tokio runtime.
    pub fn submit<F, Fut>(
        &self,
        label: &str,
        chain_id: u64,
        owner_address: &str,
        submit_fn: F,
        callbacks: TransactionCallbacks,
    ) -> String
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Box<dyn SignedSubmission>, String>> + Send + 'static,
    {
        let id = Uuid::new_v4().to_string();
        self.store.create(NewTransaction {
            id: id.clone(),
            label: label.to_string(),
            chain_id,
            owner_address: owner_address.to_string(),
        });
        log::info!(
            "[Runner] Submitting '{}' ({}) for {} on chain {}",
            label,
            id,
            owner_address,
            chain_id
        );

        let store = self.store.clone();
        let notifier = self.notifier.clone();
        let label = label.to_string();
        let task_id = id.clone();
        tokio::spawn(async move {
            drive(store, notifier, task_id, label, chain_id, submit_fn, callbacks).await;
        });

        id
    }
}

async fn drive<F, Fut>(
    store: Arc<TransactionStore>,
    notifier: Arc<Notifier>,
    id: String,
    label: String,
    chain_id: u64,
    submit_fn: F,
    callbacks: TransactionCallbacks,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<Box<dyn SignedSubmission>, String>> + Send + 'static,
{
    callbacks.sent(&id);
    notifier.signature_pending(&label);

    let submission = match submit_fn().await {
        Ok(submission) => submission,
        Err(reason) => {
            notifier.signature_rejected(&label);
            if reason.contains(USER_DENIED_SIGNATURE) {
                log::info!("[Runner] Transaction {} cancelled by user", id);
                store.update(TransactionUpdate {
                    id,
                    confirmation_status: Some(ConfirmationStatus::CancelledByUser),
                    lifecycle_state: Some(LifecycleState::Complete),
                    ..Default::default()
                });
            } else {
                log::debug!(
                    "[Runner] Submission for {} failed before signature: {}",
                    id,
                    reason
                );
            }
            return;
        }
    };

    let mut tx = submission.transaction();
    // Chain id comes back zero when legacy signing is used without
    // chain-id binding; fall back to the one supplied at submission
    if tx.chain_id.is_none() || tx.chain_id == Some(U256::zero()) {
        tx.chain_id = Some(chain_id.into());
    }
    store.update(TransactionUpdate {
        id: id.clone(),
        confirmation_status: Some(ConfirmationStatus::AwaitingChainConfirmation),
        submission_handle: Some(tx),
        ..Default::default()
    });
    callbacks.confirmed(&id);
    notifier.confirmation_pending(&label);

    let receipt = match submission.confirm().await {
        Ok(receipt) => receipt,
        Err(reason) => {
            notifier.reverted(&label);
            log::debug!("[Runner] Confirmation wait for {} failed: {}", id, reason);
            return;
        }
    };

    callbacks.complete(&id);
    let status = if receipt.status == Some(U64::from(1)) {
        ConfirmationStatus::Succeeded
    } else {
        ConfirmationStatus::Failed
    };
    store.update(TransactionUpdate {
        id: id.clone(),
        confirmation_status: Some(status),
        lifecycle_state: Some(LifecycleState::Complete),
        confirmation_receipt: Some(receipt),
        ..Default::default()
    });
    log::info!("[Runner] Transaction {} {}", id, status);

    if status == ConfirmationStatus::Succeeded {
        notifier.completed(&label);
        callbacks.success(&id);
    } else {
        notifier.reverted(&label);
        callbacks.error(&id);
    }

    callbacks.refetch(&id);
}
