//! Golden fingerprint vectors.
//!
//! Any client that publishes to the same program must derive the same
//! identifiers, so these values are fixed. Text is folded over UTF-16 code
//! units; the non-ASCII cases pin that down.

use serde::Serialize;

use ghostwrite_core::{fingerprint, Fingerprint};

/// A known input and its fingerprint.
#[derive(Debug, Clone, Serialize)]
pub struct FingerprintVector {
    pub name: &'static str,
    pub input: &'static str,
    /// Decimal value of the fingerprint.
    pub expected: &'static str,
}

impl FingerprintVector {
    /// The expected value as a ledger field literal.
    pub fn expected_literal(&self) -> String {
        format!("{}field", self.expected)
    }
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<FingerprintVector> {
    vec![
        FingerprintVector {
            name: "empty string maps to sentinel",
            input: "",
            expected: "1",
        },
        FingerprintVector {
            name: "short ascii",
            input: "hello",
            expected: "99162322",
        },
        FingerprintVector {
            name: "punctuation",
            input: "Hello, world!",
            expected: "59369447846872927221",
        },
        FingerprintVector {
            name: "wraps modulo 2^128",
            input: "The quick brown fox jumps over the lazy dog",
            expected: "309504656093883590652220563419155979603",
        },
        FingerprintVector {
            name: "latin-1 accent is one unit",
            input: "h\u{e9}llo",
            expected: "103094734",
        },
        FingerprintVector {
            name: "astral char is a surrogate pair",
            input: "\u{1f980}",
            expected: "1772802",
        },
    ]
}

/// Check every vector, returning the first mismatch.
pub fn verify_all_vectors() -> Result<(), String> {
    for vector in all_vectors() {
        let expected: Fingerprint = vector
            .expected
            .parse()
            .map_err(|e| format!("{}: bad expected value: {}", vector.name, e))?;
        let actual = fingerprint(vector.input);
        if actual != expected {
            return Err(format!(
                "{}: expected {}, got {}",
                vector.name,
                expected.to_literal(),
                actual.to_literal()
            ));
        }
    }
    Ok(())
}

/// All vectors as pretty JSON, for sharing with other implementations.
pub fn vectors_json() -> serde_json::Result<String> {
    serde_json::to_string_pretty(&all_vectors())
}
