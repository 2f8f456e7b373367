// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Email Insights
//!
//! Ingests raw `.eml` messages into an in-memory store and computes simple
//! aggregates over everything stored so far.
//!
//! # Features
//!
//! - Tolerant parsing: missing subject, sender, date or body fall back to
//!   named defaults instead of failing the upload
//! - Plain-text body extraction across nested multipart trees, skipping
//!   attachments
//! - Top senders, most common words (stopword filtered) and daily or
//!   weekly email volume
//! - A mutex-guarded store safe to share between request handlers
//!
//! # Example
//!
//! ```rust
//! use email_insights::{EmailStore, compute_analytics};
//!
//! let store = EmailStore::new();
//! let raw = b"From: sender@example.com\r\nSubject: Hello\r\n\r\nQuarterly budget review";
//! let email = store.ingest(raw, "hello.eml").unwrap();
//!
//! println!("From: {}", email.sender);
//!
//! let analytics = compute_analytics(&store, "weekly");
//! println!("{}", serde_json::to_string(&analytics).unwrap());
//! ```

mod analytics;
mod config;
mod error;
mod parser;
mod stopwords;
mod store;
mod tokenizer;
mod types;

pub use analytics::{
    analyze, bucket_key, email_count_over_time, most_common_words, top_senders, week_start,
};
pub use config::{AnalyticsConfig, DEFAULT_TOP_SENDERS, DEFAULT_TOP_WORDS};
pub use error::{ParseError, Result};
pub use parser::{normalize_body, parse_date, parse_email, validate_email};
pub use stopwords::{EMAIL_STOPWORDS, ENGLISH_STOPWORDS, is_stopword};
pub use store::{EmailStore, compute_analytics};
pub use tokenizer::tokenize;
pub use types::*;
