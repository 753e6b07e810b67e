//! # Ghostwrite Chain
//!
//! The boundary between the client and the ledger.
//!
//! ## Overview
//!
//! Everything that touches the network goes through a [`Wallet`]: the client
//! describes a program call as a [`TransactionRequest`], and the wallet signs,
//! proves and broadcasts it, returning a [`TransactionId`] or failing. The
//! client never executes or re-derives program logic.
//!
//! Two programs are called:
//!
//! - the marketplace program (`ghostwrite_v1.aleo`): `publish_content` and
//!   `purchase_content`
//! - the credits program (`credits.aleo`): `transfer_public`
//!
//! [`ProgramConfig`] builds the requests for both with the configured fees.
//!
//! [`TransactionId`]: ghostwrite_core::TransactionId

pub mod error;
pub mod program;
pub mod wallet;

pub use error::{Result, WalletError};
pub use program::{
    ProgramConfig, ProgramInput, TransactionRequest, CREDITS_PROGRAM_ID, MARKET_PROGRAM_ID,
    PUBLISH_CONTENT, PURCHASE_CONTENT, TRANSFER_PUBLIC,
};
pub use wallet::memory::MemoryWallet;
pub use wallet::Wallet;
