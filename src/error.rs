//! Error types for email ingestion

use thiserror::Error;

/// Errors that can reject a single uploaded message
///
/// Missing headers and undecodable MIME parts are not errors: the parser
/// recovers from them with default field values.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The bytes could not be read as a header/body message at all
    #[error("Failed to parse email structure: {0}")]
    Structure(String),

    /// The message parsed but carries none of From, To or Subject
    #[error("Invalid .eml file format: {0}")]
    InvalidEmail(String),

    /// Only `.eml` uploads are accepted
    #[error("Only .eml files are supported, got {0}")]
    UnsupportedFile(String),

    /// Analytics configuration could not be read
    #[error("Invalid analytics configuration: {0}")]
    Config(String),
}

/// Result type for ingestion operations
pub type Result<T> = std::result::Result<T, ParseError>;
