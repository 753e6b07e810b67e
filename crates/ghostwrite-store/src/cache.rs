//! The local ledger cache.
//!
//! Holds the published items and purchase receipts this client knows about.
//! It is the only writer of both collections and the client's source of truth
//! between network calls. A cache is opened at session start and closed at
//! session end; there is no process-wide instance.

use std::sync::{PoisonError, RwLock};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use ghostwrite_core::{ContentItem, Fingerprint, PurchaseReceipt};

use crate::error::{Result, StoreError};
use crate::traits::KvStore;

/// Storage keys of the two collections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheKeys {
    pub contents: String,
    pub purchases: String,
}

impl Default for CacheKeys {
    fn default() -> Self {
        Self {
            contents: "gw_contents".to_string(),
            purchases: "gw_purchases".to_string(),
        }
    }
}

#[derive(Debug, Default)]
struct CacheState {
    /// Newest first, by insertion.
    contents: Vec<ContentItem>,
    /// Oldest first, by insertion.
    purchases: Vec<PurchaseReceipt>,
}

/// Session cache of published items and purchase receipts.
///
/// Mutations write the whole affected collection to the store and only then
/// update the in-memory copy, so readers never see state the store lacks.
pub struct LedgerCache<S: KvStore> {
    store: S,
    keys: CacheKeys,
    state: RwLock<CacheState>,
}

impl<S: KvStore> LedgerCache<S> {
    /// Open a cache over `store`, loading whatever was persisted.
    ///
    /// Missing or unreadable collections start empty.
    pub fn open(store: S, keys: CacheKeys) -> Self {
        let contents = load_collection(&store, &keys.contents);
        let purchases = load_collection(&store, &keys.purchases);
        tracing::debug!(
            contents = contents.len(),
            purchases = purchases.len(),
            "opened ledger cache"
        );

        Self {
            store,
            keys,
            state: RwLock::new(CacheState {
                contents,
                purchases,
            }),
        }
    }

    /// End the session and hand back the store.
    pub fn close(self) -> S {
        tracing::debug!("closed ledger cache");
        self.store
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keys(&self) -> &CacheKeys {
        &self.keys
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reads
    // ─────────────────────────────────────────────────────────────────────────

    /// All published items, newest first.
    pub fn load_contents(&self) -> Vec<ContentItem> {
        self.read().contents.clone()
    }

    /// All purchase receipts, in completion order.
    pub fn load_purchases(&self) -> Vec<PurchaseReceipt> {
        self.read().purchases.clone()
    }

    /// Look up an item by identifier.
    pub fn find_content(&self, id: &Fingerprint) -> Option<ContentItem> {
        self.read().contents.iter().find(|c| &c.id == id).cloned()
    }

    /// Run `f` over both collections without cloning them.
    pub fn with_snapshot<R>(&self, f: impl FnOnce(&[ContentItem], &[PurchaseReceipt]) -> R) -> R {
        let state = self.read();
        f(&state.contents, &state.purchases)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Prepend a newly published item.
    pub fn append_content(&self, item: ContentItem) -> Result<()> {
        let mut state = self.write();

        let mut contents = Vec::with_capacity(state.contents.len() + 1);
        contents.push(item);
        contents.extend(state.contents.iter().cloned());

        self.persist(&self.keys.contents, &contents)?;
        state.contents = contents;
        Ok(())
    }

    /// Append a completed purchase.
    pub fn append_purchase(&self, receipt: PurchaseReceipt) -> Result<()> {
        let mut state = self.write();

        let mut purchases = state.purchases.clone();
        purchases.push(receipt);

        self.persist(&self.keys.purchases, &purchases)?;
        state.purchases = purchases;
        Ok(())
    }

    /// Bump the purchase count of an item.
    ///
    /// Returns `false` without writing when the item is unknown.
    pub fn increment_purchase_count(&self, content_id: &Fingerprint) -> Result<bool> {
        let mut state = self.write();

        let Some(contents) = incremented(&state.contents, content_id) else {
            return Ok(false);
        };

        self.persist(&self.keys.contents, &contents)?;
        state.contents = contents;
        Ok(true)
    }

    /// Apply a completed purchase: bump the item's count and append the receipt.
    ///
    /// Both changes become visible together. If the receipt write fails the
    /// count write is reverted.
    pub fn record_purchase(&self, receipt: PurchaseReceipt) -> Result<()> {
        let mut state = self.write();

        let contents = incremented(&state.contents, &receipt.content_id);
        let mut purchases = state.purchases.clone();
        purchases.push(receipt);

        if let Some(ref contents) = contents {
            self.persist(&self.keys.contents, contents)?;
        }

        if let Err(e) = self.persist(&self.keys.purchases, &purchases) {
            if contents.is_some() {
                if let Err(revert) = self.persist(&self.keys.contents, &state.contents) {
                    tracing::error!(error = %revert, "failed to revert purchase count");
                }
            }
            return Err(e);
        }

        if let Some(contents) = contents {
            state.contents = contents;
        }
        state.purchases = purchases;
        Ok(())
    }

    fn persist<T: Serialize>(&self, key: &str, values: &[T]) -> Result<()> {
        let blob =
            serde_json::to_vec(values).map_err(|e| StoreError::Serialization(e.to_string()))?;
        self.store.set(key, &blob)
    }

    // The state is only replaced after a successful write, so a poisoned lock
    // still guards a consistent value.
    fn read(&self) -> std::sync::RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Copy of `contents` with one more purchase on `content_id`, or `None` if absent.
fn incremented(contents: &[ContentItem], content_id: &Fingerprint) -> Option<Vec<ContentItem>> {
    let index = contents.iter().position(|c| &c.id == content_id)?;
    let mut next = contents.to_vec();
    next[index].purchases = next[index].purchases.saturating_add(1);
    Some(next)
}

fn load_collection<S: KvStore, T: DeserializeOwned>(store: &S, key: &str) -> Vec<T> {
    let bytes = match store.get(key) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(key, error = %e, "failed to read cache collection, starting empty");
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(values) => values,
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding unparseable cache collection");
            Vec::new()
        }
    }
}
