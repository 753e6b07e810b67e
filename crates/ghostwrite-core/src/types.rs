//! Strong type definitions for Ghostwrite.
//!
//! Addresses, transaction ids and amounts are newtypes so they cannot be
//! swapped for one another at call sites.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// A ledger account address (e.g. `aleo1...`). Opaque to this crate.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    /// Wrap an address string.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Borrow the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head: String = self.0.chars().take(16).collect();
        write!(f, "Address({})", head)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier returned by the wallet for a broadcast transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// Wrap a transaction id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount in microcredits, the smallest currency unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Microcredits(pub u64);

impl Microcredits {
    /// Microcredits in one credit.
    pub const PER_CREDIT: u64 = 1_000_000;

    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create from a raw microcredit count.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Whole credits.
    pub const fn from_credits(credits: u64) -> Self {
        Self(credits.saturating_mul(Self::PER_CREDIT))
    }

    /// Raw microcredit count.
    pub const fn get(&self) -> u64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a count, returning `None` on overflow.
    pub fn checked_mul(self, count: u64) -> Option<Self> {
        self.0.checked_mul(count).map(Self)
    }

    /// Portion of this amount in basis points (1/10000), rounded down.
    pub fn share_bps(self, bps: u16) -> Self {
        let scaled = u128::from(self.0) * u128::from(bps) / 10_000;
        Self(scaled as u64)
    }

    /// Parse a decimal credit amount such as `"1.5"` into microcredits.
    ///
    /// Digits past the sixth decimal place are truncated.
    pub fn parse_credits(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
        if whole.is_empty() && frac.is_empty() {
            return Err(CoreError::InvalidAmount(s.to_string()));
        }
        let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
        if !all_digits(whole) || !all_digits(frac) {
            return Err(CoreError::InvalidAmount(s.to_string()));
        }

        let whole: u64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| CoreError::InvalidAmount(s.to_string()))?
        };

        let mut frac_digits: String = frac.chars().take(6).collect();
        while frac_digits.len() < 6 {
            frac_digits.push('0');
        }
        let frac: u64 = frac_digits
            .parse()
            .map_err(|_| CoreError::InvalidAmount(s.to_string()))?;

        whole
            .checked_mul(Self::PER_CREDIT)
            .and_then(|w| w.checked_add(frac))
            .map(Self)
            .ok_or(CoreError::AmountOverflow)
    }
}

impl fmt::Display for Microcredits {
    /// Credits with two decimals, rounded half up.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cents = (u128::from(self.0) + 5_000) / 10_000;
        write!(f, "{}.{:02}", cents / 100, cents % 100)
    }
}

impl FromStr for Microcredits {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_credits(s)
    }
}

impl std::iter::Sum for Microcredits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.fold(0u64, |acc, m| acc.saturating_add(m.0)))
    }
}

/// Current Unix time in seconds.
pub fn now_secs() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
