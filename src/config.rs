//! Manager configuration.

use crate::core::DEFAULT_JOURNAL_LIMIT;
use serde::{Deserialize, Serialize};

/// How the manager decides whether the host supports push/replace.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityMode {
    /// Ask the native store.
    #[default]
    Detect,
    /// Always fall back to full navigation.
    ForceDegraded,
}

/// Options for a `HistoryManager`. Every field has a default, so a partial
/// JSON document is a valid configuration.
///
/// ```rust
/// use pagestate::{CapabilityMode, HistoryConfig};
///
/// let config = HistoryConfig::from_json(r#"{"capability": "force_degraded"}"#).unwrap();
/// assert_eq!(config.capability, CapabilityMode::ForceDegraded);
/// assert!(config.ignore_pop_before_push);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capability: CapabilityMode,
    /// Records retained by the navigation journal; values above
    /// `MAX_JOURNAL_LIMIT` (1024) are clamped
    pub journal_limit: usize,
    /// Drop pop notifications that arrive before the first push.
    pub ignore_pop_before_push: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capability: CapabilityMode::Detect,
            journal_limit: DEFAULT_JOURNAL_LIMIT,
            ignore_pop_before_push: true,
        }
    }
}

impl HistoryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = HistoryConfig::from_json("{}").unwrap();
        assert_eq!(config, HistoryConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config = HistoryConfig::from_json(
            r#"{"journal_limit": 4, "ignore_pop_before_push": false}"#,
        )
        .unwrap();
        assert_eq!(config.capability, CapabilityMode::Detect);
        assert_eq!(config.journal_limit, 4);
        assert!(!config.ignore_pop_before_push);
    }

    #[test]
    fn unknown_capability_is_rejected() {
        assert!(HistoryConfig::from_json(r#"{"capability": "sometimes"}"#).is_err());
    }
}
