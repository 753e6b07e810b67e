//! # Ghostwrite Testkit
//!
//! Testing utilities for Ghostwrite.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known fingerprints for cross-implementation checks
//! - **Generators**: Proptest strategies for drafts, addresses and prices
//! - **Fixtures**: A ready marketplace with named parties and a scripted wallet
//!
//! ## Golden Vectors
//!
//! ```rust
//! use ghostwrite_testkit::vectors::verify_all_vectors;
//!
//! verify_all_vectors().unwrap();
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use ghostwrite_testkit::generators::draft;
//!
//! proptest! {
//!     #[test]
//!     fn drafts_validate(d in draft()) {
//!         prop_assert!(d.validate().is_ok());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use ghostwrite_testkit::fixtures::{TestMarket, ALICE};
//!
//! let fixture = TestMarket::new();
//! assert_eq!(fixture.current().map(|a| a.to_string()), Some(ALICE.to_string()));
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{credits, random_address, TestMarket, ALICE, BOB, CAROL};
pub use generators::{address, credit_input, draft, price};
pub use vectors::{all_vectors, verify_all_vectors, FingerprintVector};
