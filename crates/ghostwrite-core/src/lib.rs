//! # Ghostwrite Core
//!
//! Pure primitives for the Ghostwrite marketplace client: content
//! fingerprints, published items, and purchase receipts.
//!
//! This crate contains no I/O, no storage, no networking.
//!
//! ## Key Types
//!
//! - [`Fingerprint`] - Ledger field value identifying a piece of text
//! - [`ContentItem`] - A published piece of content as cached locally
//! - [`PurchaseReceipt`] - Proof that a buyer completed a purchase
//! - [`ContentDraft`] - Validated input to the publish workflow
//! - [`AttemptId`] - Per-invocation identifier for purchase attempts
//!
//! ## Fingerprints
//!
//! Content identifiers are computed with [`fingerprint`]. See the
//! [`fingerprint`](mod@fingerprint) module for the folding rule and its limits.

pub mod attempt;
pub mod content;
pub mod error;
pub mod fingerprint;
pub mod receipt;
pub mod types;

pub use attempt::AttemptId;
pub use content::{ContentDraft, ContentItem, DEFAULT_PREVIEW_CHARS};
pub use error::{CoreError, ValidationError};
pub use fingerprint::{fingerprint, Fingerprint};
pub use receipt::PurchaseReceipt;
pub use types::{now_secs, Address, Microcredits, TransactionId};
