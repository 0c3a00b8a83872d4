//! Error types for rs-news-extract.
//!
//! Nothing in the public API fails for a well-formed HTML string. These errors
//! travel between internal helpers and are turned into `None` at the boundary.

/// Error type for fallible internal steps.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A base URL or href could not be parsed or resolved.
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl {
        /// The offending input.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// The readability algorithm failed on the document.
    #[error("readability extraction failed: {0}")]
    Readability(String),

    /// No extractable content was found in the document.
    #[error("no extractable content found")]
    NoContent,
}

/// Result type alias for internal operations.
pub type Result<T> = std::result::Result<T, Error>;
