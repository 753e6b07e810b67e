//! Ledger program calls.
//!
//! Inputs are rendered as ledger literals: fields as `<n>field`, integers as
//! `<n>u64`, addresses verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

use ghostwrite_core::{Address, Fingerprint, Microcredits};

/// The marketplace program.
pub const MARKET_PROGRAM_ID: &str = "ghostwrite_v1.aleo";

/// The native credits program.
pub const CREDITS_PROGRAM_ID: &str = "credits.aleo";

pub const PUBLISH_CONTENT: &str = "publish_content";
pub const PURCHASE_CONTENT: &str = "purchase_content";
pub const TRANSFER_PUBLIC: &str = "transfer_public";

/// One argument of a program call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramInput {
    Field(Fingerprint),
    U64(u64),
    Address(Address),
}

impl fmt::Display for ProgramInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramInput::Field(fp) => write!(f, "{}", fp),
            ProgramInput::U64(n) => write!(f, "{}u64", n),
            ProgramInput::Address(addr) => write!(f, "{}", addr),
        }
    }
}

impl Serialize for ProgramInput {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A program call for the wallet to sign and broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRequest {
    pub program: String,
    pub function: String,
    pub inputs: Vec<ProgramInput>,
    /// Fee budget, paid publicly.
    pub fee: Microcredits,
}

impl TransactionRequest {
    /// Inputs as the literal strings the wallet expects.
    pub fn input_literals(&self) -> Vec<String> {
        self.inputs.iter().map(ToString::to_string).collect()
    }
}

/// Program ids and fee budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    pub program_id: String,
    pub credits_program_id: String,
    pub publish_fee: Microcredits,
    pub transfer_fee: Microcredits,
    pub access_fee: Microcredits,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: MARKET_PROGRAM_ID.to_string(),
            credits_program_id: CREDITS_PROGRAM_ID.to_string(),
            publish_fee: Microcredits::new(500_000),
            transfer_fee: Microcredits::new(300_000),
            access_fee: Microcredits::new(300_000),
        }
    }
}

impl ProgramConfig {
    /// `publish_content(title_hash, content_hash, price, timestamp)`.
    pub fn publish_content(
        &self,
        title_hash: Fingerprint,
        content_hash: Fingerprint,
        price: Microcredits,
        timestamp: u64,
    ) -> TransactionRequest {
        TransactionRequest {
            program: self.program_id.clone(),
            function: PUBLISH_CONTENT.to_string(),
            inputs: vec![
                ProgramInput::Field(title_hash),
                ProgramInput::Field(content_hash),
                ProgramInput::U64(price.get()),
                ProgramInput::U64(timestamp),
            ],
            fee: self.publish_fee,
        }
    }

    /// `transfer_public(to, amount)` on the credits program.
    pub fn transfer_public(&self, to: &Address, amount: Microcredits) -> TransactionRequest {
        TransactionRequest {
            program: self.credits_program_id.clone(),
            function: TRANSFER_PUBLIC.to_string(),
            inputs: vec![ProgramInput::Address(to.clone()), ProgramInput::U64(amount.get())],
            fee: self.transfer_fee,
        }
    }

    /// `purchase_content(content_id, author, price, timestamp)`.
    pub fn purchase_content(
        &self,
        content_id: Fingerprint,
        author: &Address,
        price: Microcredits,
        timestamp: u64,
    ) -> TransactionRequest {
        TransactionRequest {
            program: self.program_id.clone(),
            function: PURCHASE_CONTENT.to_string(),
            inputs: vec![
                ProgramInput::Field(content_id),
                ProgramInput::Address(author.clone()),
                ProgramInput::U64(price.get()),
                ProgramInput::U64(timestamp),
            ],
            fee: self.access_fee,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostwrite_core::fingerprint;

    #[test]
    fn test_publish_literals() {
        let config = ProgramConfig::default();
        let req = config.publish_content(
            fingerprint("hello"),
            fingerprint(""),
            Microcredits::new(1_000_000),
            1_700_000_000,
        );

        assert_eq!(req.program, "ghostwrite_v1.aleo");
        assert_eq!(req.function, "publish_content");
        assert_eq!(req.fee, Microcredits::new(500_000));
        assert_eq!(
            req.input_literals(),
            ["99162322field", "1field", "1000000u64", "1700000000u64"]
        );
    }

    #[test]
    fn test_transfer_literals() {
        let config = ProgramConfig::default();
        let req = config.transfer_public(&Address::from("aleo1author"), Microcredits::new(250));

        assert_eq!(req.program, "credits.aleo");
        assert_eq!(req.function, "transfer_public");
        assert_eq!(req.fee, Microcredits::new(300_000));
        assert_eq!(req.input_literals(), ["aleo1author", "250u64"]);
    }

    #[test]
    fn test_purchase_literals() {
        let config = ProgramConfig::default();
        let req = config.purchase_content(
            fingerprint("hello"),
            &Address::from("aleo1author"),
            Microcredits::new(7),
            9,
        );

        assert_eq!(req.function, "purchase_content");
        assert_eq!(
            req.input_literals(),
            ["99162322field", "aleo1author", "7u64", "9u64"]
        );
    }

    #[test]
    fn test_request_serializes_literals() {
        let req = ProgramConfig::default().transfer_public(&Address::from("aleo1x"), Microcredits::new(1));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["inputs"][1], "1u64");
        assert_eq!(value["fee"], 300_000);
    }

    #[test]
    fn test_config_defaults_fill_missing_fields() {
        let config: ProgramConfig = serde_json::from_str(r#"{"publish_fee": 10}"#).unwrap();
        assert_eq!(config.publish_fee, Microcredits::new(10));
        assert_eq!(config.program_id, MARKET_PROGRAM_ID);
    }
}
