//! Purchase attempt identifiers.
//!
//! Every purchase invocation gets a fresh [`AttemptId`]. The ledger program
//! takes no idempotency key, so the id cannot prevent a double payment; it
//! ties together the log lines and the error of one attempt so that a
//! funds-spent failure can be reconciled by hand.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fingerprint::Fingerprint;
use crate::types::Address;

/// Domain separator for attempt derivation.
const ATTEMPT_DOMAIN: &[u8] = b"ghostwrite/purchase-attempt/v1";

/// A 32-byte purchase attempt identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttemptId([u8; 32]);

impl AttemptId {
    /// Derive from the purchase target and a caller-supplied nonce.
    pub fn derive(content_id: &Fingerprint, buyer: &Address, nonce: &[u8; 16]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(ATTEMPT_DOMAIN);
        hasher.update(&content_id.value().to_le_bytes());
        hasher.update(&(buyer.as_str().len() as u64).to_le_bytes());
        hasher.update(buyer.as_str().as_bytes());
        hasher.update(nonce);
        Self(*hasher.finalize().as_bytes())
    }

    /// Derive with a random nonce.
    pub fn generate(content_id: &Fingerprint, buyer: &Address) -> Self {
        let nonce: [u8; 16] = rand::random();
        Self::derive(content_id, buyer, &nonce)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttemptId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}
