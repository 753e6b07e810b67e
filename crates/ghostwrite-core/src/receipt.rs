//! Purchase receipts.

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::types::{Address, TransactionId};

/// Record that `buyer` completed both purchase transactions for a content item.
///
/// Created only after payment and access issuance both succeed. Never mutated.
/// At most one receipt per `(content_id, buyer)` is expected, but nothing
/// enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseReceipt {
    pub content_id: Fingerprint,
    pub buyer: Address,
    /// Access issuance time, Unix seconds.
    pub timestamp: u64,
    pub payment_tx_id: TransactionId,
    pub access_tx_id: TransactionId,
}

impl PurchaseReceipt {
    /// Does this receipt grant `buyer` access to `content_id`?
    pub fn grants(&self, content_id: &Fingerprint, buyer: &Address) -> bool {
        &self.content_id == content_id && &self.buyer == buyer
    }
}
