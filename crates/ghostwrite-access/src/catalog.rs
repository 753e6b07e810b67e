//! Catalog and dashboard views over cached content.
//!
//! Sorting and searching are presentation concerns; the cache keeps insertion
//! order and these functions produce ordered views on demand.

use serde::{Deserialize, Serialize};

use ghostwrite_core::{Address, ContentItem, Microcredits, PurchaseReceipt};

use crate::policy::AccessIndex;

/// Share of each sale credited to the author, in basis points.
pub const AUTHOR_SHARE_BPS: u16 = 9_500;

/// Ordering of a catalog listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Most recently published first.
    #[default]
    Newest,
    /// Lowest price first.
    Cheapest,
    /// Most purchased first.
    Popular,
}

/// Parameters of a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrowseQuery {
    /// Case-insensitive substring filter.
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl BrowseQuery {
    pub fn new(sort: SortOrder) -> Self {
        Self { search: None, sort }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }
}

/// List active items for `viewer`.
///
/// A search term matches the title of items the viewer can read and the
/// identifier of items it cannot, so locked titles never leak through search.
pub fn browse<'a>(
    contents: &'a [ContentItem],
    viewer: Option<&Address>,
    purchases: &[PurchaseReceipt],
    query: &BrowseQuery,
) -> Vec<&'a ContentItem> {
    let index = AccessIndex::new(purchases);
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut items: Vec<&ContentItem> = contents
        .iter()
        .filter(|c| c.is_active)
        .filter(|c| match needle {
            None => true,
            Some(ref needle) => {
                let haystack = if index.can_view(viewer, c) {
                    c.title.to_lowercase()
                } else {
                    c.id.to_literal()
                };
                haystack.contains(needle.as_str())
            }
        })
        .collect();

    // Stable sorts keep cache order among equal keys.
    match query.sort {
        SortOrder::Newest => items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        SortOrder::Cheapest => items.sort_by_key(|c| c.price),
        SortOrder::Popular => items.sort_by(|a, b| b.purchases.cmp(&a.purchases)),
    }

    items
}

/// Items published by `viewer`.
pub fn authored_by<'a>(contents: &'a [ContentItem], viewer: Option<&Address>) -> Vec<&'a ContentItem> {
    let Some(viewer) = viewer else {
        return Vec::new();
    };
    contents.iter().filter(|c| c.is_authored_by(viewer)).collect()
}

/// Items `viewer` holds a receipt for, in catalog order.
pub fn purchased_by<'a>(
    contents: &'a [ContentItem],
    purchases: &[PurchaseReceipt],
    viewer: Option<&Address>,
) -> Vec<&'a ContentItem> {
    let Some(viewer) = viewer else {
        return Vec::new();
    };
    contents
        .iter()
        .filter(|c| purchases.iter().any(|p| p.grants(&c.id, viewer)))
        .collect()
}

/// Author earnings on one item: `purchases * price`, less the platform share.
pub fn item_revenue(item: &ContentItem) -> Microcredits {
    item.price
        .checked_mul(item.purchases)
        .unwrap_or(Microcredits::new(u64::MAX))
        .share_bps(AUTHOR_SHARE_BPS)
}

/// Total author earnings across `items`.
pub fn author_revenue<'a>(items: impl IntoIterator<Item = &'a ContentItem>) -> Microcredits {
    items.into_iter().map(item_revenue).sum()
}
