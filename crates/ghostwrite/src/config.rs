//! Marketplace configuration.

use serde::{Deserialize, Serialize};

use ghostwrite_chain::ProgramConfig;
use ghostwrite_core::DEFAULT_PREVIEW_CHARS;
use ghostwrite_store::CacheKeys;

/// Configuration for a [`Marketplace`](crate::Marketplace) session.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Program ids and fee budgets.
    pub programs: ProgramConfig,
    /// Length of the public preview, in UTF-16 code units.
    pub preview_chars: usize,
    /// Storage keys of the cached collections.
    pub cache_keys: CacheKeys,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            programs: ProgramConfig::default(),
            preview_chars: DEFAULT_PREVIEW_CHARS,
            cache_keys: CacheKeys::default(),
        }
    }
}

impl MarketConfig {
    /// Parse from a JSON document, filling gaps with defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghostwrite_core::Microcredits;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.preview_chars, 200);
        assert_eq!(config.programs.program_id, "ghostwrite_v1.aleo");
        assert_eq!(config.cache_keys.contents, "gw_contents");
    }

    #[test]
    fn test_partial_json() {
        let config = MarketConfig::from_json(
            r#"{ "preview_chars": 80, "programs": { "access_fee": 123 } }"#,
        )
        .unwrap();
        assert_eq!(config.preview_chars, 80);
        assert_eq!(config.programs.access_fee, Microcredits::new(123));
        assert_eq!(config.programs.transfer_fee, Microcredits::new(300_000));
        assert_eq!(config.cache_keys, CacheKeys::default());
    }
}
