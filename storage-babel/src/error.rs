//! Error types for format and publishing operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during format operations
///
/// Rendering itself is total; only registry lookups and writing artifacts can fail.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Writing an exported artifact failed
    #[error("Failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors returned by a [`PageStore`](crate::publish::PageStore).
#[derive(Debug, Error)]
pub enum PublishError {
    /// The configured site address is not a valid URL
    #[error("Invalid site URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// Required settings are absent (names the missing keys)
    #[error("Missing required settings: {}", .0.join(", "))]
    MissingSettings(Vec<String>),
    /// Transport-level failure (connection, TLS, timeout, malformed JSON)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("Server responded with status {status}: {body}")]
    Status { status: u16, body: String },
}
