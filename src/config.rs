//! Analytics configuration

use crate::error::{ParseError, Result};
use crate::types::GroupBy;
use serde::{Deserialize, Serialize};

/// Number of senders reported by default
pub const DEFAULT_TOP_SENDERS: usize = 5;

/// Number of words reported by default
pub const DEFAULT_TOP_WORDS: usize = 20;

/// Limits and bucketing used when computing [`crate::Analytics`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// How many senders to keep, most frequent first
    pub top_senders: usize,

    /// How many words to keep, most frequent first
    pub top_words: usize,

    /// Bucketing for volume over time
    pub group_by: GroupBy,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            top_senders: DEFAULT_TOP_SENDERS,
            top_words: DEFAULT_TOP_WORDS,
            group_by: GroupBy::Daily,
        }
    }
}

impl AnalyticsConfig {
    /// Default limits with the bucketing named by a request parameter
    #[must_use]
    pub fn grouped(group_by: &str) -> Self {
        Self {
            group_by: GroupBy::from_param(group_by),
            ..Self::default()
        }
    }

    /// Read a configuration from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ParseError::Config(e.to_string()))
    }
}
