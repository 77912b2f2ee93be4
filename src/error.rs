//! Error types for the row-class checker

use thiserror::Error;

/// Result type alias for checker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, extracting, or verifying rows
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to build the HTTP client
    #[error("Client initialization failed: {0}")]
    InitializationError(String),

    /// Failed to fetch a page or read its body
    #[error("Failed to fetch page: {0}")]
    FetchError(String),

    /// An invalid CSS selector was supplied
    #[error("Invalid selector `{0}`")]
    SelectorError(String),

    /// A row lacks a parsable class attribute
    #[error("Row {index} has no parsable class attribute: {reason}")]
    MalformedRow { index: usize, reason: String },

    /// A non-empty result set was required but zero rows were found
    #[error("Expected at least one row, found none")]
    EmptySequence,

    /// Generic error
    #[error("{0}")]
    Other(String),
}
