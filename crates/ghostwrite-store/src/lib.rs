//! # Ghostwrite Store
//!
//! Persistence for the Ghostwrite client. Provides a synchronous key-value
//! abstraction with SQLite and in-memory backends, and the [`LedgerCache`]
//! built on top of it.
//!
//! ## Key Types
//!
//! - [`KvStore`] - Get/set of opaque blobs by string key
//! - [`SqliteKvStore`] - SQLite-backed durable store
//! - [`MemoryKvStore`] - In-memory store for tests and throwaway sessions
//! - [`LedgerCache`] - Published items and purchase receipts for one session
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ghostwrite_store::{CacheKeys, LedgerCache, SqliteKvStore};
//!
//! let store = SqliteKvStore::open("ghostwrite.db").unwrap();
//! let cache = LedgerCache::open(store, CacheKeys::default());
//!
//! for item in cache.load_contents() {
//!     println!("{} {}", item.id, item.price);
//! }
//!
//! let _store = cache.close();
//! ```
//!
//! ## Design Notes
//!
//! - **Whole-collection writes**: every mutation rewrites the affected
//!   collection as one JSON blob before returning
//! - **Unreadable blobs load as empty**: parse failures are logged, not returned
//! - **Last writer wins**: two caches over one store overwrite each other

pub mod cache;
pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use cache::{CacheKeys, LedgerCache};
pub use error::{Result, StoreError};
pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;
pub use traits::KvStore;
