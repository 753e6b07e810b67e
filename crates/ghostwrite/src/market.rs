//! The Marketplace: one client session over a wallet and a ledger cache.
//!
//! The session owns its cache. It is created with [`Marketplace::open`] when
//! the user starts and torn down with [`Marketplace::close`], which hands the
//! store back.

use tokio::sync::watch;

use ghostwrite_access::{self as access, BrowseQuery};
use ghostwrite_chain::Wallet;
use ghostwrite_core::{Address, ContentItem, Fingerprint, Microcredits, PurchaseReceipt};
use ghostwrite_store::{KvStore, LedgerCache};

use crate::config::MarketConfig;
use crate::purchase::PurchaseStep;

/// A client session.
///
/// Provides:
/// - Publishing content
/// - Purchasing access to content
/// - Access checks and catalog views over the local cache
///
/// Concurrent calls are not coordinated. Two purchases of the same item
/// started together will both pay; preventing that is up to the caller.
pub struct Marketplace<W: Wallet, S: KvStore> {
    /// The signer all transactions go through.
    pub(crate) wallet: W,
    /// Published items and receipts for this session.
    pub(crate) cache: LedgerCache<S>,
    pub(crate) config: MarketConfig,
    /// Latest purchase progress.
    pub(crate) purchase_step: watch::Sender<PurchaseStep>,
}

impl<W: Wallet, S: KvStore> Marketplace<W, S> {
    /// Start a session, loading cached state from `store`.
    pub fn open(wallet: W, store: S, config: MarketConfig) -> Self {
        let cache = LedgerCache::open(store, config.cache_keys.clone());
        let (purchase_step, _) = watch::channel(PurchaseStep::Idle);

        Self {
            wallet,
            cache,
            config,
            purchase_step,
        }
    }

    /// End the session and return the store.
    pub fn close(self) -> S {
        self.cache.close()
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn cache(&self) -> &LedgerCache<S> {
        &self.cache
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// The connected identity, or `None` when the wallet has no session.
    pub fn viewer(&self) -> Option<Address> {
        if self.wallet.is_connected() {
            self.wallet.identity()
        } else {
            None
        }
    }

    /// Follow purchase progress.
    ///
    /// One channel per session; with overlapping purchases it shows whichever
    /// moved last.
    pub fn purchase_steps(&self) -> watch::Receiver<PurchaseStep> {
        self.purchase_step.subscribe()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Cache Queries
    // ─────────────────────────────────────────────────────────────────────────

    /// All cached items, newest first.
    pub fn contents(&self) -> Vec<ContentItem> {
        self.cache.load_contents()
    }

    /// All cached receipts.
    pub fn purchases(&self) -> Vec<PurchaseReceipt> {
        self.cache.load_purchases()
    }

    pub fn content(&self, id: &Fingerprint) -> Option<ContentItem> {
        self.cache.find_content(id)
    }

    /// Can `viewer` read `item`, given the cached receipts?
    pub fn can_view(&self, viewer: Option<&Address>, item: &ContentItem) -> bool {
        self.cache
            .with_snapshot(|_, purchases| access::can_view(viewer, item, purchases))
    }

    /// Can `viewer` read the item with identifier `id`?
    pub fn has_access(&self, viewer: Option<&Address>, id: &Fingerprint) -> bool {
        self.cache
            .with_snapshot(|contents, purchases| access::has_access(viewer, id, contents, purchases))
    }

    /// Catalog listing for `viewer`.
    pub fn browse(&self, viewer: Option<&Address>, query: &BrowseQuery) -> Vec<ContentItem> {
        self.cache.with_snapshot(|contents, purchases| {
            access::browse(contents, viewer, purchases, query)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Items `viewer` published.
    pub fn my_content(&self, viewer: Option<&Address>) -> Vec<ContentItem> {
        self.cache.with_snapshot(|contents, _| {
            access::authored_by(contents, viewer).into_iter().cloned().collect()
        })
    }

    /// Items `viewer` bought.
    pub fn my_purchased_content(&self, viewer: Option<&Address>) -> Vec<ContentItem> {
        self.cache.with_snapshot(|contents, purchases| {
            access::purchased_by(contents, purchases, viewer)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    /// Author share of all sales of `viewer`'s items.
    pub fn revenue(&self, viewer: Option<&Address>) -> Microcredits {
        self.cache
            .with_snapshot(|contents, _| access::author_revenue(access::authored_by(contents, viewer)))
    }
}
