//! Lifecycle callback bag.

/// Callback invoked with the record id of the submission it belongs to.
pub type TxCallback = Box<dyn Fn(&str) + Send + Sync + 'static>;

/// Optional side-effect hooks fired at fixed lifecycle milestones.
///
/// Each hook fires at most once per submission, in the order the fields
/// are declared below; `refetch` always fires last when the flow reaches
/// completion. Hooks are scoped to the in-memory submission — they are
/// never persisted and do not survive a restart.
#[derive(Default)]
pub struct TransactionCallbacks {
    /// The submission flow has started, before the signature request
    pub on_sent: Option<TxCallback>,
    /// The signer approved and the transaction was broadcast
    pub on_confirmed: Option<TxCallback>,
    /// The confirmation receipt arrived, before success/failure
    /// classification
    pub on_complete: Option<TxCallback>,
    /// The receipt reported success
    pub on_success: Option<TxCallback>,
    /// The receipt reported failure
    pub on_error: Option<TxCallback>,
    /// Fired last once the flow completes, whatever the outcome
    pub refetch: Option<TxCallback>,
}

impl TransactionCallbacks {
    pub(crate) fn sent(&self, id: &str) {
        if let Some(cb) = &self.on_sent {
            cb(id);
        }
    }

    pub(crate) fn confirmed(&self, id: &str) {
        if let Some(cb) = &self.on_confirmed {
            cb(id);
        }
    }

    pub(crate) fn complete(&self, id: &str) {
        if let Some(cb) = &self.on_complete {
            cb(id);
        }
    }

    pub(crate) fn success(&self, id: &str) {
        if let Some(cb) = &self.on_success {
            cb(id);
        }
    }

    pub(crate) fn error(&self, id: &str) {
        if let Some(cb) = &self.on_error {
            cb(id);
        }
    }

    pub(crate) fn refetch(&self, id: &str) {
        if let Some(cb) = &self.refetch {
            cb(id);
        }
    }
}
