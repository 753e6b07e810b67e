//! Error types for the marketplace workflows.

use ghostwrite_chain::WalletError;
use ghostwrite_core::{AttemptId, TransactionId, ValidationError};
use ghostwrite_store::StoreError;
use thiserror::Error;

/// Errors surfaced by [`Marketplace`](crate::Marketplace) operations.
///
/// Nothing is retried automatically. Every retry is a new call.
#[derive(Debug, Error)]
pub enum MarketError {
    /// A precondition failed before any transaction was sent.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The publish transaction was not accepted. Nothing was cached.
    #[error("publish submission failed: {0}")]
    Submission(#[source] WalletError),

    /// The payment transfer failed. No funds moved and nothing was cached.
    #[error("payment failed (attempt {attempt}): {source}")]
    Payment {
        attempt: AttemptId,
        source: WalletError,
    },

    /// Access issuance failed after the payment went through.
    ///
    /// The buyer has paid but holds no access record. There is no refund
    /// path; the payment transaction id is kept for manual resolution.
    #[error(
        "access grant failed after payment {payment_tx_id} (attempt {attempt}); funds were spent: {source}"
    )]
    AccessGrant {
        attempt: AttemptId,
        payment_tx_id: TransactionId,
        source: WalletError,
    },

    /// The ledger accepted the transaction but the local cache write failed.
    ///
    /// `attempt` is set when this ends a purchase, in which case the buyer
    /// has paid and holds an on-chain access record the cache does not show.
    #[error("transaction {tx_id} succeeded but could not be recorded locally: {source}")]
    Unrecorded {
        tx_id: TransactionId,
        attempt: Option<AttemptId>,
        source: StoreError,
    },
}

impl MarketError {
    /// Did this failure leave the buyer's funds transferred?
    pub fn funds_spent(&self) -> bool {
        matches!(
            self,
            MarketError::AccessGrant { .. }
                | MarketError::Unrecorded {
                    attempt: Some(_),
                    ..
                }
        )
    }

    /// The purchase attempt this error belongs to, if any.
    pub fn attempt(&self) -> Option<&AttemptId> {
        match self {
            MarketError::Payment { attempt, .. } | MarketError::AccessGrant { attempt, .. } => {
                Some(attempt)
            }
            MarketError::Unrecorded { attempt, .. } => attempt.as_ref(),
            MarketError::Validation(_) | MarketError::Submission(_) => None,
        }
    }
}

/// Result type for marketplace operations.
pub type Result<T> = std::result::Result<T, MarketError>;
