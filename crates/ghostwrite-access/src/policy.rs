//! The access predicate.

use std::collections::{HashMap, HashSet};

use ghostwrite_core::{Address, ContentItem, Fingerprint, PurchaseReceipt};

/// Can `viewer` read `item`?
///
/// True iff a viewer is present and is either the author or the buyer on a
/// receipt for this item.
pub fn can_view(viewer: Option<&Address>, item: &ContentItem, purchases: &[PurchaseReceipt]) -> bool {
    let Some(viewer) = viewer else {
        return false;
    };

    item.is_authored_by(viewer) || purchases.iter().any(|p| p.grants(&item.id, viewer))
}

/// Can `viewer` read the item with `content_id`?
///
/// Resolves the id against `contents` for the author check. An id that is
/// not in the catalog is readable only with a receipt.
pub fn has_access(
    viewer: Option<&Address>,
    content_id: &Fingerprint,
    contents: &[ContentItem],
    purchases: &[PurchaseReceipt],
) -> bool {
    let Some(viewer) = viewer else {
        return false;
    };

    if contents
        .iter()
        .any(|c| &c.id == content_id && c.is_authored_by(viewer))
    {
        return true;
    }

    purchases.iter().any(|p| p.grants(content_id, viewer))
}

/// Receipts indexed by buyer, for checking many items at once.
#[derive(Debug, Default)]
pub struct AccessIndex<'a> {
    by_buyer: HashMap<&'a Address, HashSet<Fingerprint>>,
}

impl<'a> AccessIndex<'a> {
    /// Build from a receipt list.
    pub fn new(purchases: &'a [PurchaseReceipt]) -> Self {
        let mut by_buyer: HashMap<&'a Address, HashSet<Fingerprint>> = HashMap::new();
        for p in purchases {
            by_buyer.entry(&p.buyer).or_default().insert(p.content_id);
        }
        Self { by_buyer }
    }

    /// Same rule as [`can_view`].
    pub fn can_view(&self, viewer: Option<&Address>, item: &ContentItem) -> bool {
        let Some(viewer) = viewer else {
            return false;
        };

        item.is_authored_by(viewer)
            || self
                .by_buyer
                .get(viewer)
                .is_some_and(|ids| ids.contains(&item.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostwrite_core::{ContentDraft, Microcredits, TransactionId};
    use proptest::prelude::*;

    fn item(author: &str) -> ContentItem {
        let draft = ContentDraft::new("t", "secret body", Microcredits::new(1_000_000));
        ContentItem::published(
            &draft,
            Address::from(author),
            TransactionId::new("at1publish"),
            1,
            200,
        )
    }

    fn receipt(item: &ContentItem, buyer: &str) -> PurchaseReceipt {
        PurchaseReceipt {
            content_id: item.id,
            buyer: Address::from(buyer),
            timestamp: 2,
            payment_tx_id: TransactionId::new("at1pay"),
            access_tx_id: TransactionId::new("at1access"),
        }
    }

    #[test]
    fn test_author_can_view_without_receipts() {
        let it = item("aleo1author");
        assert!(can_view(Some(&Address::from("aleo1author")), &it, &[]));
    }

    #[test]
    fn test_stranger_cannot_view() {
        let it = item("aleo1author");
        assert!(!can_view(Some(&Address::from("aleo1stranger")), &it, &[]));
    }

    #[test]
    fn test_buyer_with_receipt_can_view() {
        let it = item("aleo1author");
        let receipts = [receipt(&it, "aleo1buyer")];
        assert!(can_view(Some(&Address::from("aleo1buyer")), &it, &receipts));
        assert!(!can_view(Some(&Address::from("aleo1other")), &it, &receipts));
    }

    #[test]
    fn test_disconnected_never_views() {
        let it = item("aleo1author");
        let receipts = [receipt(&it, "aleo1buyer")];
        assert!(!can_view(None, &it, &receipts));
        assert!(!has_access(None, &it.id, &[it.clone()], &receipts));
    }

    #[test]
    fn test_receipt_for_other_item_does_not_grant() {
        let it = item("aleo1author");
        let mut other = it.clone();
        other.id = Fingerprint::from_u128(77);
        let receipts = [receipt(&other, "aleo1buyer")];
        assert!(!can_view(Some(&Address::from("aleo1buyer")), &it, &receipts));
    }

    #[test]
    fn test_has_access_resolves_author() {
        let it = item("aleo1author");
        let contents = [it.clone()];
        assert!(has_access(Some(&Address::from("aleo1author")), &it.id, &contents, &[]));
        assert!(!has_access(Some(&Address::from("aleo1author")), &it.id, &[], &[]));
    }

    proptest! {
        #[test]
        fn test_index_agrees_with_predicate(
            buyers in prop::collection::vec("[a-d]", 0..6),
            viewer in proptest::option::of("[a-e]"),
        ) {
            let it = item("a");
            let receipts: Vec<_> = buyers.iter().map(|b| receipt(&it, b)).collect();
            let viewer = viewer.map(Address::from);
            let index = AccessIndex::new(&receipts);

            prop_assert_eq!(
                index.can_view(viewer.as_ref(), &it),
                can_view(viewer.as_ref(), &it, &receipts)
            );
        }
    }
}
