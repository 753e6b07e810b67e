//! Published content items.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::fingerprint::{fingerprint, Fingerprint};
use crate::types::{Address, Microcredits, TransactionId};

/// Length of the body kept as a preview, in UTF-16 code units.
///
/// Same unit as [`fingerprint`], so previews match other clients of the
/// program byte for byte.
pub const DEFAULT_PREVIEW_CHARS: usize = 200;

/// Author input to the publish workflow, not yet on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentDraft {
    pub title: String,
    pub body: String,
    pub price: Microcredits,
}

impl ContentDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>, price: Microcredits) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            price,
        }
    }

    /// Check the draft can be published.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.body.trim().is_empty() {
            return Err(ValidationError::EmptyBody);
        }
        if self.price.is_zero() {
            return Err(ValidationError::ZeroPrice);
        }
        Ok(())
    }

    pub fn title_hash(&self) -> Fingerprint {
        fingerprint(&self.title)
    }

    /// The content identifier. Depends on the body only.
    pub fn content_hash(&self) -> Fingerprint {
        fingerprint(&self.body)
    }
}

/// A published piece of content as held in the local cache.
///
/// Immutable once created apart from `purchases` and `is_active`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    /// Body fingerprint; primary key.
    pub id: Fingerprint,
    pub title_hash: Fingerprint,
    pub title: String,
    pub body: String,
    pub preview: String,
    #[serde(rename = "priceMicrocredits")]
    pub price: Microcredits,
    pub author: Address,
    /// Publish time, Unix seconds.
    pub timestamp: u64,
    pub tx_id: TransactionId,
    /// Completed purchases seen by this client.
    #[serde(default)]
    pub purchases: u64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl ContentItem {
    /// Build the cached item for a draft whose publish transaction succeeded.
    pub fn published(
        draft: &ContentDraft,
        author: Address,
        tx_id: TransactionId,
        timestamp: u64,
        preview_chars: usize,
    ) -> Self {
        Self {
            id: draft.content_hash(),
            title_hash: draft.title_hash(),
            title: draft.title.clone(),
            body: draft.body.clone(),
            preview: preview_of(&draft.body, preview_chars),
            price: draft.price,
            author,
            timestamp,
            tx_id,
            purchases: 0,
            is_active: true,
        }
    }

    pub fn is_authored_by(&self, address: &Address) -> bool {
        &self.author == address
    }
}

/// Leading part of `body` at most `units` UTF-16 code units long.
///
/// A surrogate pair that would straddle the limit is dropped whole.
pub fn preview_of(body: &str, units: usize) -> String {
    let mut used = 0;
    body.chars()
        .take_while(|c| {
            used += c.len_utf16();
            used <= units
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ContentDraft {
        ContentDraft::new("Leak", "The documents show...", Microcredits::new(1_000_000))
    }

    #[test]
    fn test_validate() {
        assert_eq!(draft().validate(), Ok(()));

        let mut d = draft();
        d.title = "   ".into();
        assert_eq!(d.validate(), Err(ValidationError::EmptyTitle));

        let mut d = draft();
        d.body = "\n".into();
        assert_eq!(d.validate(), Err(ValidationError::EmptyBody));

        let mut d = draft();
        d.price = Microcredits::ZERO;
        assert_eq!(d.validate(), Err(ValidationError::ZeroPrice));
    }

    #[test]
    fn test_id_derived_from_body_only() {
        let a = draft();
        let mut b = draft();
        b.title = "Different title".into();
        b.price = Microcredits::new(5);
        assert_eq!(a.content_hash(), b.content_hash());
        assert_ne!(a.title_hash(), b.title_hash());
    }

    #[test]
    fn test_published_item() {
        let item = ContentItem::published(
            &draft(),
            Address::from("aleo1author"),
            TransactionId::new("at1tx"),
            1_700_000_000,
            4,
        );
        assert_eq!(item.id, fingerprint("The documents show..."));
        assert_eq!(item.preview, "The ");
        assert_eq!(item.purchases, 0);
        assert!(item.is_active);
        assert!(item.is_authored_by(&Address::from("aleo1author")));
    }

    #[test]
    fn test_preview_counts_utf16_units() {
        assert_eq!(preview_of("héllo wörld", 5), "héllo");
        assert_eq!(preview_of("ab", 200), "ab");
        // Each crab is a surrogate pair.
        assert_eq!(preview_of("🦀🦀🦀", 4), "🦀🦀");
        assert_eq!(preview_of("🦀🦀🦀", 3), "🦀");
        assert_eq!(preview_of("a🦀", 2), "a");
    }

    #[test]
    fn test_json_field_names() {
        let item = ContentItem::published(
            &draft(),
            Address::from("aleo1author"),
            TransactionId::new("at1tx"),
            42,
            DEFAULT_PREVIEW_CHARS,
        );
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["priceMicrocredits"], 1_000_000);
        assert_eq!(value["txId"], "at1tx");
        assert_eq!(value["isActive"], true);
        assert!(value["titleHash"].as_str().unwrap().ends_with("field"));
    }
}
