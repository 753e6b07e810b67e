//! # Ghostwrite
//!
//! The client API for the Ghostwrite marketplace: publish confidential
//! writing behind a price, and buy access to someone else's.
//!
//! ## Overview
//!
//! A [`Marketplace`] is one client session. It holds:
//!
//! - **A wallet**: the signer every ledger transaction goes through
//! - **A ledger cache**: published items and purchase receipts, persisted
//!   in a key-value store
//! - **A config**: program ids, fee budgets, preview length and cache keys
//!
//! ## Key Concepts
//!
//! - **Fingerprint**: A 128-bit text hash. The body fingerprint is the
//!   item's identifier.
//! - **Publish**: One transaction, then one cache write.
//! - **Purchase**: A payment transaction, then an access transaction. Not
//!   atomic; a failure between the two leaves the buyer's funds spent.
//! - **Access**: Derived, never stored. Author or receipt holder only.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ghostwrite::{Marketplace, MarketConfig, Microcredits};
//! use ghostwrite::chain::MemoryWallet;
//! use ghostwrite::store::SqliteKvStore;
//!
//! async fn example() {
//!     let store = SqliteKvStore::open("ghostwrite.db").unwrap();
//!     let wallet = MemoryWallet::connected("aleo1author");
//!     let market = Marketplace::open(wallet, store, MarketConfig::default());
//!
//!     let me = market.viewer();
//!     let item = market
//!         .publish(me.as_ref(), "Memo", "The full text", Microcredits::from_credits(1))
//!         .await
//!         .unwrap();
//!
//!     assert!(market.can_view(me.as_ref(), &item));
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `ghostwrite::core` - Fingerprints, content items, receipts
//! - `ghostwrite::store` - Key-value stores and the ledger cache
//! - `ghostwrite::access` - Access predicate and catalog views
//! - `ghostwrite::chain` - Wallet boundary and program calls

pub mod config;
pub mod error;
pub mod market;
pub mod publish;
pub mod purchase;

// Re-export component crates
pub use ghostwrite_access as access;
pub use ghostwrite_chain as chain;
pub use ghostwrite_core as core;
pub use ghostwrite_store as store;

// Re-export main types for convenience
pub use config::MarketConfig;
pub use error::{MarketError, Result};
pub use market::Marketplace;
pub use purchase::{PurchasePhase, PurchaseStep};

// Re-export commonly used types
pub use ghostwrite_access::{BrowseQuery, SortOrder};
pub use ghostwrite_chain::{Wallet, WalletError};
pub use ghostwrite_core::{
    fingerprint, Address, ContentItem, Fingerprint, Microcredits, PurchaseReceipt, TransactionId,
    ValidationError,
};
