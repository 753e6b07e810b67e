//! The purchase workflow.
//!
//! Two transactions in strict order:
//!
//! 1. `transfer_public(author, price)` on the credits program pays the author
//! 2. `purchase_content(id, author, price, timestamp)` issues the access record
//!
//! The second is only sent after the first is confirmed. The two are not
//! atomic: if the access grant fails after payment, the buyer has paid and
//! holds nothing, and the error says so.

use std::fmt;

use ghostwrite_chain::Wallet;
use ghostwrite_core::{now_secs, Address, AttemptId, ContentItem, PurchaseReceipt, ValidationError};
use ghostwrite_store::KvStore;

use crate::error::{MarketError, Result};
use crate::market::Marketplace;

/// Which step a failed purchase stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchasePhase {
    Payment,
    AccessGrant,
    /// Both transactions succeeded; the local cache write did not.
    Recording,
}

/// Progress of a purchase, as shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PurchaseStep {
    #[default]
    Idle,
    PayingAuthor,
    GrantingAccess,
    Complete,
    Failed {
        phase: PurchasePhase,
        funds_spent: bool,
    },
}

impl PurchaseStep {
    /// User-facing progress message.
    pub fn label(&self) -> &'static str {
        match self {
            PurchaseStep::Idle => "",
            PurchaseStep::PayingAuthor => "Sending payment to author...",
            PurchaseStep::GrantingAccess => "Creating access token...",
            PurchaseStep::Complete => "Purchase complete",
            PurchaseStep::Failed {
                phase: PurchasePhase::Recording,
                ..
            } => "Purchase complete but not saved on this device",
            PurchaseStep::Failed {
                funds_spent: true, ..
            } => "Payment sent but access was not granted",
            PurchaseStep::Failed { .. } => "Purchase failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PurchaseStep::Complete | PurchaseStep::Failed { .. })
    }
}

impl fmt::Display for PurchaseStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl<W: Wallet, S: KvStore> Marketplace<W, S> {
    /// Buy access to `item` as `buyer`.
    ///
    /// On success the receipt is cached and the item's purchase count is
    /// incremented. Check [`MarketError::funds_spent`] on failure: an
    /// [`MarketError::AccessGrant`] means the payment already went through.
    pub async fn purchase(&self, buyer: Option<&Address>, item: &ContentItem) -> Result<PurchaseReceipt> {
        let buyer = buyer.ok_or(ValidationError::NotConnected)?;
        if item.is_authored_by(buyer) {
            return Err(ValidationError::SelfPurchase.into());
        }

        let attempt = AttemptId::generate(&item.id, buyer);
        tracing::info!(
            %attempt,
            content = %item.id,
            price = item.price.get(),
            "starting purchase"
        );

        // Phase 1: pay the author.
        self.set_step(PurchaseStep::PayingAuthor);
        let payment = self.config.programs.transfer_public(&item.author, item.price);
        let payment_tx_id = match self.wallet.submit_transaction(payment).await {
            Ok(tx_id) => tx_id,
            Err(source) => {
                tracing::warn!(%attempt, error = %source, "payment failed, no funds moved");
                self.set_step(PurchaseStep::Failed {
                    phase: PurchasePhase::Payment,
                    funds_spent: false,
                });
                return Err(MarketError::Payment { attempt, source });
            }
        };
        tracing::debug!(%attempt, tx_id = %payment_tx_id, "payment confirmed");

        // Phase 2: issue the access record.
        self.set_step(PurchaseStep::GrantingAccess);
        let timestamp = now_secs();
        let grant = self
            .config
            .programs
            .purchase_content(item.id, &item.author, item.price, timestamp);
        let access_tx_id = match self.wallet.submit_transaction(grant).await {
            Ok(tx_id) => tx_id,
            Err(source) => {
                tracing::error!(
                    %attempt,
                    payment_tx_id = %payment_tx_id,
                    error = %source,
                    "access grant failed after payment; funds were spent"
                );
                self.set_step(PurchaseStep::Failed {
                    phase: PurchasePhase::AccessGrant,
                    funds_spent: true,
                });
                return Err(MarketError::AccessGrant {
                    attempt,
                    payment_tx_id,
                    source,
                });
            }
        };

        let receipt = PurchaseReceipt {
            content_id: item.id,
            buyer: buyer.clone(),
            timestamp,
            payment_tx_id,
            access_tx_id,
        };

        // Both transactions are on the ledger from here on.
        if let Err(source) = self.cache.record_purchase(receipt.clone()) {
            tracing::error!(%attempt, tx_id = %receipt.access_tx_id, error = %source, "purchase not recorded");
            self.set_step(PurchaseStep::Failed {
                phase: PurchasePhase::Recording,
                funds_spent: true,
            });
            return Err(MarketError::Unrecorded {
                tx_id: receipt.access_tx_id,
                attempt: Some(attempt),
                source,
            });
        }
        self.set_step(PurchaseStep::Complete);

        tracing::info!(
            %attempt,
            content = %item.id,
            access_tx_id = %receipt.access_tx_id,
            "purchase complete"
        );
        Ok(receipt)
    }

    fn set_step(&self, step: PurchaseStep) {
        self.purchase_step.send_replace(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use ghostwrite_chain::{MemoryWallet, WalletError, PURCHASE_CONTENT, TRANSFER_PUBLIC};
    use ghostwrite_core::Microcredits;
    use ghostwrite_store::MemoryKvStore;

    use crate::config::MarketConfig;

    type TestMarket = Marketplace<Arc<MemoryWallet>, MemoryKvStore>;

    /// A market with one item by `aleo1author`, wallet switched to `aleo1buyer`.
    async fn market_with_item() -> (TestMarket, ContentItem) {
        let wallet = Arc::new(MemoryWallet::connected("aleo1author"));
        let m = Marketplace::open(wallet, MemoryKvStore::new(), MarketConfig::default());
        let item = m
            .publish(m.viewer().as_ref(), "Memo", "The memo body", Microcredits::new(1_000_000))
            .await
            .unwrap();
        m.wallet().connect("aleo1buyer");
        (m, item)
    }

    #[tokio::test]
    async fn test_purchase_records_receipt() {
        let (m, item) = market_with_item().await;
        let buyer = m.viewer();

        assert!(!m.can_view(buyer.as_ref(), &item));
        let receipt = m.purchase(buyer.as_ref(), &item).await.unwrap();

        assert_eq!(receipt.content_id, item.id);
        assert_eq!(receipt.buyer, Address::from("aleo1buyer"));
        assert_ne!(receipt.payment_tx_id, receipt.access_tx_id);
        assert!(m.can_view(buyer.as_ref(), &item));
        assert_eq!(m.content(&item.id).unwrap().purchases, 1);
        assert_eq!(m.purchases(), vec![receipt]);
        assert_eq!(*m.purchase_steps().borrow(), PurchaseStep::Complete);
    }

    #[tokio::test]
    async fn test_transactions_in_order() {
        let (m, item) = market_with_item().await;
        m.purchase(m.viewer().as_ref(), &item).await.unwrap();

        let requests = m.wallet().requests();
        let tail: Vec<_> = requests[1..].iter().map(|r| r.function.as_str()).collect();
        assert_eq!(tail, [TRANSFER_PUBLIC, PURCHASE_CONTENT]);

        assert_eq!(requests[1].program, "credits.aleo");
        assert_eq!(requests[1].input_literals(), ["aleo1author", "1000000u64"]);
        assert_eq!(requests[2].input_literals()[0], item.id.to_literal());
        assert_eq!(requests[2].input_literals()[1], "aleo1author");
    }

    #[tokio::test]
    async fn test_self_purchase_rejected() {
        let (m, item) = market_with_item().await;
        let author = Address::from("aleo1author");

        let result = m.purchase(Some(&author), &item).await;
        assert!(matches!(
            result,
            Err(MarketError::Validation(ValidationError::SelfPurchase))
        ));
        assert_eq!(m.wallet().requests().len(), 1);
        assert_eq!(m.content(&item.id).unwrap().purchases, 0);
    }

    #[tokio::test]
    async fn test_disconnected_buyer_rejected() {
        let (m, item) = market_with_item().await;
        let result = m.purchase(None, &item).await;
        assert!(matches!(
            result,
            Err(MarketError::Validation(ValidationError::NotConnected))
        ));
        assert_eq!(*m.purchase_steps().borrow(), PurchaseStep::Idle);
    }

    #[tokio::test]
    async fn test_payment_failure_skips_access_grant() {
        let (m, item) = market_with_item().await;
        m.wallet()
            .fail_function(TRANSFER_PUBLIC, WalletError::Rejected("declined".into()));

        let err = m.purchase(m.viewer().as_ref(), &item).await.unwrap_err();
        assert!(matches!(err, MarketError::Payment { .. }));
        assert!(!err.funds_spent());
        assert!(err.attempt().is_some());

        assert_eq!(m.wallet().calls().last().map(String::as_str), Some(TRANSFER_PUBLIC));
        assert!(m.purchases().is_empty());
        assert_eq!(m.content(&item.id).unwrap().purchases, 0);
        assert_eq!(
            *m.purchase_steps().borrow(),
            PurchaseStep::Failed {
                phase: PurchasePhase::Payment,
                funds_spent: false
            }
        );
    }

    #[tokio::test]
    async fn test_access_failure_reports_spent_funds() {
        let (m, item) = market_with_item().await;
        m.wallet()
            .fail_function(PURCHASE_CONTENT, WalletError::Network("dropped".into()));

        let err = m.purchase(m.viewer().as_ref(), &item).await.unwrap_err();
        assert!(err.funds_spent());
        match &err {
            MarketError::AccessGrant { payment_tx_id, .. } => {
                assert!(!payment_tx_id.as_str().is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(m.purchases().is_empty());
        assert!(!m.can_view(m.viewer().as_ref(), &item));
        assert!(m.purchase_steps().borrow().label().contains("Payment sent"));
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(PurchaseStep::PayingAuthor.label(), "Sending payment to author...");
        assert_eq!(PurchaseStep::GrantingAccess.label(), "Creating access token...");
        assert!(!PurchaseStep::GrantingAccess.is_terminal());
        assert!(PurchaseStep::Complete.is_terminal());

        let unrecorded = PurchaseStep::Failed {
            phase: PurchasePhase::Recording,
            funds_spent: true,
        };
        assert!(unrecorded.label().contains("not saved"));
    }
}
