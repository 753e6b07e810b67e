//! Test fixtures and helpers.
//!
//! A marketplace over an in-memory store and a scripted wallet, with named
//! parties to switch between.

use std::sync::Arc;

use rand::distributions::Alphanumeric;
use rand::Rng;

use ghostwrite::{MarketConfig, Marketplace, Result};
use ghostwrite_chain::{MemoryWallet, Wallet};
use ghostwrite_core::{Address, ContentItem, Microcredits, PurchaseReceipt};
use ghostwrite_store::MemoryKvStore;

pub const ALICE: &str = "aleo1alice0000000000000000000000000000000000000000000000000";
pub const BOB: &str = "aleo1bob000000000000000000000000000000000000000000000000000";
pub const CAROL: &str = "aleo1carol0000000000000000000000000000000000000000000000000";

/// Parse a credit amount as typed into a price field, e.g. `"1.5"`.
///
/// Panics on malformed input; fixtures only take literals.
pub fn credits(amount: &str) -> Microcredits {
    amount
        .parse()
        .unwrap_or_else(|e| panic!("bad credit amount {amount:?}: {e}"))
}

/// A random address-shaped string.
pub fn random_address() -> Address {
    let tail: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(58)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    Address::new(format!("aleo1{tail}"))
}

/// A marketplace fixture. Starts connected as [`ALICE`].
pub struct TestMarket {
    pub wallet: Arc<MemoryWallet>,
    pub market: Marketplace<Arc<MemoryWallet>, MemoryKvStore>,
}

impl TestMarket {
    pub fn new() -> Self {
        Self::with_config(MarketConfig::default())
    }

    pub fn with_config(config: MarketConfig) -> Self {
        let wallet = Arc::new(MemoryWallet::connected(ALICE));
        let market = Marketplace::open(Arc::clone(&wallet), MemoryKvStore::new(), config);
        Self { wallet, market }
    }

    /// Reconnect the wallet as `party`.
    pub fn act_as(&self, party: &str) -> Address {
        self.wallet.connect(party);
        Address::from(party)
    }

    /// The connected party.
    pub fn current(&self) -> Option<Address> {
        self.wallet.identity()
    }

    /// Publish as the connected party.
    pub async fn publish(&self, title: &str, body: &str, price: Microcredits) -> Result<ContentItem> {
        let author = self.market.viewer();
        self.market.publish(author.as_ref(), title, body, price).await
    }

    /// Buy `item` as the connected party.
    pub async fn purchase(&self, item: &ContentItem) -> Result<PurchaseReceipt> {
        let buyer = self.market.viewer();
        self.market.purchase(buyer.as_ref(), item).await
    }

    /// Publish a one-credit item as `author`, then reconnect as the previous party.
    pub async fn publish_as(&self, author: &str, title: &str, body: &str) -> Result<ContentItem> {
        let previous = self.current();
        self.act_as(author);
        let result = self.publish(title, body, credits("1")).await;
        match previous {
            Some(party) => self.wallet.connect(party),
            None => self.wallet.disconnect(),
        }
        result
    }
}

impl Default for TestMarket {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostwrite::MarketError;
    use ghostwrite_chain::{WalletError, PURCHASE_CONTENT};

    #[test]
    fn test_random_addresses_differ() {
        let a = random_address();
        assert!(a.as_str().starts_with("aleo1"));
        assert_eq!(a.as_str().len(), 63);
        assert_ne!(a, random_address());
    }

    #[tokio::test]
    async fn test_three_party_access() {
        let f = TestMarket::new();
        let item = f.publish("Title", "Body", credits("2.5")).await.unwrap();
        assert_eq!(item.price, Microcredits::new(2_500_000));

        let bob = f.act_as(BOB);
        f.purchase(&item).await.unwrap();

        let alice = Address::from(ALICE);
        let carol = Address::from(CAROL);
        assert!(f.market.can_view(Some(&alice), &item));
        assert!(f.market.can_view(Some(&bob), &item));
        assert!(!f.market.can_view(Some(&carol), &item));
    }

    #[tokio::test]
    async fn test_publish_as_restores_party() {
        let f = TestMarket::new();
        f.act_as(BOB);
        let item = f.publish_as(CAROL, "T", "carol's body").await.unwrap();

        assert_eq!(item.author, Address::from(CAROL));
        assert_eq!(f.current(), Some(Address::from(BOB)));
    }

    #[tokio::test]
    async fn test_stranded_payment_is_visible() {
        let f = TestMarket::new();
        let item = f.publish("T", "B", Microcredits::new(1)).await.unwrap();
        f.act_as(BOB);
        f.wallet
            .fail_function(PURCHASE_CONTENT, WalletError::Rejected("no".into()));

        let err = f.purchase(&item).await.unwrap_err();
        assert!(matches!(err, MarketError::AccessGrant { .. }));
        assert!(!f.market.can_view(f.current().as_ref(), &item));
    }
}
