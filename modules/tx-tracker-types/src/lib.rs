//! Shared types for the transaction lifecycle tracker and its consumers.

use chrono::{DateTime, Utc};
use ethers::types::{Transaction, TransactionReceipt};
use serde::{Deserialize, Serialize};

// =====================================================
// State enums
// =====================================================

/// Coarse lifecycle flag. A transaction is pending until it has been
/// cancelled, has failed or has succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LifecycleState {
    Pending,
    Complete,
}

impl LifecycleState {
    pub fn is_complete(&self) -> bool {
        matches!(self, LifecycleState::Complete)
    }
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Pending => write!(f, "pending"),
            LifecycleState::Complete => write!(f, "complete"),
        }
    }
}

impl std::str::FromStr for LifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(LifecycleState::Pending),
            "complete" => Ok(LifecycleState::Complete),
            _ => Err(format!("Unknown lifecycle state: {}", s)),
        }
    }
}

/// Fine-grained progress of a submitted transaction.
///
/// Progression is linear:
/// 1. `AwaitingUserSignature`
/// 2. `AwaitingChainConfirmation` or `CancelledByUser`
/// 3. `Succeeded` or `Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmationStatus {
    /// Waiting for the holder of the signing key to approve the request
    AwaitingUserSignature,
    /// Approved and broadcast, waiting for chain inclusion
    AwaitingChainConfirmation,
    /// The signer explicitly rejected the signature request
    CancelledByUser,
    /// Confirmed on-chain with a success status code
    Succeeded,
    /// Confirmed on-chain with a failure status code
    Failed,
}

impl ConfirmationStatus {
    /// Terminal statuses end the lifecycle; no further transitions occur.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ConfirmationStatus::CancelledByUser
                | ConfirmationStatus::Succeeded
                | ConfirmationStatus::Failed
        )
    }
}

impl std::fmt::Display for ConfirmationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfirmationStatus::AwaitingUserSignature => write!(f, "awaitingUserSignature"),
            ConfirmationStatus::AwaitingChainConfirmation => {
                write!(f, "awaitingChainConfirmation")
            }
            ConfirmationStatus::CancelledByUser => write!(f, "cancelledByUser"),
            ConfirmationStatus::Succeeded => write!(f, "succeeded"),
            ConfirmationStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for ConfirmationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "awaitingUserSignature" => Ok(ConfirmationStatus::AwaitingUserSignature),
            "awaitingChainConfirmation" => Ok(ConfirmationStatus::AwaitingChainConfirmation),
            "cancelledByUser" => Ok(ConfirmationStatus::CancelledByUser),
            "succeeded" => Ok(ConfirmationStatus::Succeeded),
            "failed" => Ok(ConfirmationStatus::Failed),
            _ => Err(format!("Unknown confirmation status: {}", s)),
        }
    }
}

// =====================================================
// Record
// =====================================================

/// One tracked transaction, from signature request to final settlement.
///
/// Records are created by the runner and mutated only through the store;
/// consumers read. Optional fields fill in as the transaction advances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Unique identifier, generated at creation, sole lookup key
    pub id: String,
    /// Human-readable operation name, used for display and notifications
    pub label: String,
    /// Target network at submission time
    pub chain_id: u64,
    /// Account that initiated the operation
    pub owner_address: String,
    /// Coarse pending/complete flag
    pub lifecycle_state: LifecycleState,
    /// Fine-grained progress stage
    pub confirmation_status: ConfirmationStatus,
    /// Broadcast transaction as returned by the signer (set once signed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_handle: Option<Transaction>,
    /// Finalized on-chain receipt (set once confirmed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_receipt: Option<TransactionReceipt>,
    /// When the record was registered
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl TransactionRecord {
    /// New record in the initial state: pending, awaiting user signature.
    pub fn new(id: String, label: String, chain_id: u64, owner_address: String) -> Self {
        Self {
            id,
            label,
            chain_id,
            owner_address,
            lifecycle_state: LifecycleState::Pending,
            confirmation_status: ConfirmationStatus::AwaitingUserSignature,
            submission_handle: None,
            confirmation_receipt: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the flow is still in progress (not yet cancelled, failed
    /// or succeeded).
    pub fn in_flight(&self) -> bool {
        !self.lifecycle_state.is_complete()
    }

    /// Block-explorer link for the broadcast transaction, if it has been
    /// broadcast and the chain has a known explorer.
    pub fn explorer_url(&self) -> Option<String> {
        let handle = self.submission_handle.as_ref()?;
        let base = explorer_base_url(self.chain_id)?;
        Some(format!("{}/{:#x}", base, handle.hash))
    }
}

/// Explorer base URL (transaction pages) for the networks the protocol
/// deploys to.
pub fn explorer_base_url(chain_id: u64) -> Option<&'static str> {
    match chain_id {
        1 => Some("https://etherscan.io/tx"),
        4 => Some("https://rinkeby.etherscan.io/tx"),
        137 => Some("https://polygonscan.com/tx"),
        80001 => Some("https://mumbai.polygonscan.com/tx"),
        43114 => Some("https://snowtrace.io/tx"),
        _ => None,
    }
}
