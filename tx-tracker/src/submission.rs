//! Inbound contract with the wallet/provider layer.
//!
//! The runner never signs or broadcasts anything itself. The caller hands
//! it a zero-argument async operation that performs the actual signed
//! submission and resolves to a [`SignedSubmission`] once the holder of
//! the signing key approves the request.

use async_trait::async_trait;
use ethers::types::{Transaction, TransactionReceipt};

/// Reason string wallet layers produce when the user declines to sign.
/// A failure whose reason contains this marker maps to cancellation;
/// every other failure is unclassified.
pub const USER_DENIED_SIGNATURE: &str = "User denied transaction signature";

/// A transaction the signer has approved and broadcast.
///
/// This is the sole integration point with whatever wallet layer performs
/// signing and broadcast: `transaction` is the broadcast snapshot
/// (including the chain-id field the runner may correct), and `confirm`
/// resolves once the network has included and settled it. There is no
/// internal timeout — a stalled chain keeps the future pending.
#[async_trait]
pub trait SignedSubmission: Send {
    /// Snapshot of the broadcast transaction as the signer returned it.
    fn transaction(&self) -> Transaction;

    /// Wait for chain inclusion and return the finalized receipt.
    async fn confirm(self: Box<Self>) -> Result<TransactionReceipt, String>;
}
