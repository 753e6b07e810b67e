//! Error types for the wallet boundary.

use thiserror::Error;

/// Reasons a transaction submission can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined to sign.
    #[error("transaction rejected: {0}")]
    Rejected(String),

    /// No wallet session.
    #[error("wallet not connected")]
    NotConnected,

    /// Broadcast or proving service failure.
    #[error("network error: {0}")]
    Network(String),

    #[error("wallet error: {0}")]
    Other(String),
}

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;
