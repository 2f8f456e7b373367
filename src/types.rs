//! Core types for parsed emails and derived aggregates

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Subject used when the header is absent or empty
pub const DEFAULT_SUBJECT: &str = "No Subject";

/// Sender used when the From header is absent or empty
pub const DEFAULT_SENDER: &str = "Unknown Sender";

/// Body used when no plain-text content survives extraction
pub const DEFAULT_BODY: &str = "No text content found";

/// A parsed email as kept in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEmail {
    /// Decoded Subject header
    pub subject: String,

    /// From header, verbatim after decoding
    pub sender: String,

    /// Date header, or processing time when missing or unreadable
    pub timestamp: DateTime<FixedOffset>,

    /// Whitespace-normalized plain-text body
    pub body: String,

    /// Name the message was uploaded under
    pub filename: String,
}

/// How many emails a sender contributed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderCount {
    pub sender: String,
    pub count: usize,
}

/// How often a token appeared across bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Email counts keyed by `YYYY-MM-DD` bucket label
pub type TimeBucketCounts = BTreeMap<String, usize>;

/// Aggregates computed over one store snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analytics {
    pub top_senders: Vec<SenderCount>,
    pub most_common_words: Vec<WordCount>,
    pub email_count_over_time: TimeBucketCounts,
}

impl Analytics {
    /// True when no email contributed to any aggregate
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.top_senders.is_empty()
            && self.most_common_words.is_empty()
            && self.email_count_over_time.is_empty()
    }
}

/// Calendar bucketing for volume over time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Daily,
    Weekly,
}

impl GroupBy {
    /// Map a request parameter to a bucketing; unknown values fall back to daily
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        match value {
            "weekly" => Self::Weekly,
            _ => Self::Daily,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Liveness summary of the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreHealth {
    pub status: String,
    pub email_count: usize,
}
