//! Error types for Ghostwrite Core.

use thiserror::Error;

/// Errors raised while parsing or decoding core values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid fingerprint literal: {0}")]
    InvalidFingerprint(String),

    #[error("invalid credit amount: {0}")]
    InvalidAmount(String),

    #[error("amount overflow")]
    AmountOverflow,
}

/// A precondition was violated before any side effect took place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("wallet not connected")]
    NotConnected,

    #[error("cannot purchase your own content")]
    SelfPurchase,

    #[error("price must be greater than zero")]
    ZeroPrice,

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("body must not be empty")]
    EmptyBody,
}
