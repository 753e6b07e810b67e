//! Proptest generators for property-based testing.

use proptest::prelude::*;

use ghostwrite_core::{Address, ContentDraft, Fingerprint, Microcredits, PurchaseReceipt, TransactionId};

/// Generate an address-shaped string.
pub fn address() -> impl Strategy<Value = Address> {
    "aleo1[a-z0-9]{8,20}".prop_map(Address::from)
}

/// Generate a nonzero price up to 1000 credits.
pub fn price() -> impl Strategy<Value = Microcredits> {
    (1u64..=1_000 * Microcredits::PER_CREDIT).prop_map(Microcredits::new)
}

/// Generate a credit amount as typed by a user, with its expected value.
///
/// Digits past the sixth decimal place are truncated, never rounded.
pub fn credit_input() -> impl Strategy<Value = (String, Microcredits)> {
    (0u64..1_000_000, "[0-9]{0,9}").prop_map(|(whole, frac)| {
        let mut six: String = frac.chars().take(6).collect();
        while six.len() < 6 {
            six.push('0');
        }
        let micro = whole * Microcredits::PER_CREDIT + six.parse::<u64>().unwrap_or(0);
        let input = if frac.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{frac}")
        };
        (input, Microcredits::new(micro))
    })
}

/// Generate arbitrary text, including non-BMP characters.
pub fn text(max_chars: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(any::<char>(), 0..=max_chars).prop_map(|cs| cs.into_iter().collect())
}

/// Generate text with at least one non-whitespace character.
pub fn non_blank_text(max_chars: usize) -> impl Strategy<Value = String> {
    text(max_chars).prop_filter("must not be blank", |s| !s.trim().is_empty())
}

/// Generate a draft that passes validation.
pub fn draft() -> impl Strategy<Value = ContentDraft> {
    (non_blank_text(40), non_blank_text(400), price())
        .prop_map(|(title, body, price)| ContentDraft::new(title, body, price))
}

/// Generate a Fingerprint.
pub fn fingerprint_value() -> impl Strategy<Value = Fingerprint> {
    any::<u128>().prop_map(Fingerprint::from_u128)
}

/// Generate a receipt for `content_id` with a random buyer.
pub fn receipt_for(content_id: Fingerprint) -> impl Strategy<Value = PurchaseReceipt> {
    (address(), 0u64..=4_000_000_000).prop_map(move |(buyer, timestamp)| PurchaseReceipt {
        content_id,
        buyer,
        timestamp,
        payment_tx_id: TransactionId::new(format!("at1pay{timestamp}")),
        access_tx_id: TransactionId::new(format!("at1access{timestamp}")),
    })
}
