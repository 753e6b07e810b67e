//! Content fingerprints.
//!
//! A fingerprint folds the UTF-16 code units of a string into a 128-bit
//! accumulator (`h = h * 31 + unit`, wrapping). The result is written to the
//! ledger as a field literal such as `99162322field`.
//!
//! The fold is NOT collision resistant: distinct texts can share a
//! fingerprint, and two items with the same body always do. The ledger
//! program keys published content by this value, so changing the function
//! would orphan everything already on-chain.

use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Suffix of a ledger field literal.
const FIELD_SUFFIX: &str = "field";

/// Number of literal characters shown by [`Fingerprint::short`].
const SHORT_LEN: usize = 32;

/// A 128-bit content fingerprint.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u128);

impl Fingerprint {
    /// The zero value. Means "no content" and is never produced by [`fingerprint`].
    pub const ZERO: Self = Self(0);

    /// What an all-zero fold is remapped to.
    pub const SENTINEL: Self = Self(1);

    /// Create from a raw value.
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub const fn value(&self) -> u128 {
        self.0
    }

    /// Render as a ledger field literal.
    pub fn to_literal(&self) -> String {
        format!("{}{}", self.0, FIELD_SUFFIX)
    }

    /// Truncated literal for display next to locked content.
    pub fn short(&self) -> String {
        self.to_literal().chars().take(SHORT_LEN).collect()
    }
}

/// Compute the fingerprint of `text`.
///
/// Total over all strings; the empty string maps to [`Fingerprint::SENTINEL`].
pub fn fingerprint(text: &str) -> Fingerprint {
    let folded = text
        .encode_utf16()
        .fold(0u128, |acc, unit| {
            acc.wrapping_mul(31).wrapping_add(u128::from(unit))
        });

    if folded == 0 {
        Fingerprint::SENTINEL
    } else {
        Fingerprint(folded)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self.short())
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, FIELD_SUFFIX)
    }
}

impl FromStr for Fingerprint {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_suffix(FIELD_SUFFIX).unwrap_or(s);
        digits
            .parse::<u128>()
            .map(Self)
            .map_err(|_| CoreError::InvalidFingerprint(s.to_string()))
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_literal())
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        literal.parse().map_err(de::Error::custom)
    }
}
