//! In-memory email collection and the upload pipeline

use crate::analytics::analyze;
use crate::config::AnalyticsConfig;
use crate::error::{ParseError, Result};
use crate::parser::{parse_email, validate_email};
use crate::types::{Analytics, ParsedEmail, StoreHealth};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Extension accepted by [`EmailStore::ingest`]
const EML_EXTENSION: &str = ".eml";

/// Insertion-ordered collection of parsed emails
///
/// Every read and write goes through one mutex, so concurrent uploads
/// never lose appends and analytics always see a consistent snapshot.
/// Contents live for the lifetime of the store only.
#[derive(Debug, Default)]
pub struct EmailStore {
    emails: Mutex<Vec<ParsedEmail>>,
}

impl EmailStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            emails: Mutex::new(Vec::new()),
        }
    }

    // Poisoning is ignored: push and clear never leave the Vec partially updated.
    fn lock(&self) -> MutexGuard<'_, Vec<ParsedEmail>> {
        self.emails.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate, parse and store an uploaded `.eml` file
    ///
    /// Nothing is stored unless every step succeeds.
    pub fn ingest(&self, raw: &[u8], filename: &str) -> Result<ParsedEmail> {
        if !has_eml_extension(filename) {
            warn!("Rejected upload {filename}: not an .eml file");
            return Err(ParseError::UnsupportedFile(filename.to_string()));
        }

        if !validate_email(raw) {
            warn!("Rejected upload {filename}: no From, To or Subject header");
            return Err(ParseError::InvalidEmail(filename.to_string()));
        }

        let email = parse_email(raw, filename)?;
        self.append(email.clone());
        info!("Stored {filename}");
        Ok(email)
    }

    pub fn append(&self, email: ParsedEmail) {
        self.lock().push(email);
    }

    /// Copy of every stored email, oldest first
    #[must_use]
    pub fn snapshot(&self) -> Vec<ParsedEmail> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        let mut emails = self.lock();
        debug!("Clearing {} stored emails", emails.len());
        emails.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    #[must_use]
    pub fn health(&self) -> StoreHealth {
        StoreHealth {
            status: "healthy".to_string(),
            email_count: self.len(),
        }
    }

    /// Aggregates over a snapshot taken under the lock
    #[must_use]
    pub fn analytics(&self, config: &AnalyticsConfig) -> Analytics {
        let emails = self.snapshot();
        analyze(&emails, config)
    }
}

/// Aggregates with default limits, bucketed by a request parameter
///
/// `group_by` is `"daily"` or `"weekly"`; anything else means daily.
#[must_use]
pub fn compute_analytics(store: &EmailStore, group_by: &str) -> Analytics {
    store.analytics(&AnalyticsConfig::grouped(group_by))
}

fn has_eml_extension(filename: &str) -> bool {
    filename.ends_with(EML_EXTENSION)
}
