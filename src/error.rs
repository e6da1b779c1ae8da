//! Error types for the client.
//!
//! This module contains the single [`Error`] enum used throughout the crate.
//! Error messages are designed to be clear and actionable.
//!
//! # Error Handling
//!
//! Only transport-level and encoding failures surface as `Err` values. An
//! HTTP response with an error status (>= 400) is *not* an error here: it is
//! routed to the client's error handler and returned as a
//! [`Resolution::Error`](crate::Resolution::Error) so the caller can inspect
//! the raw response.
//!
//! # Example
//!
//! ```rust
//! use restpoint::{Error, RequestClient};
//!
//! let client = RequestClient::new("not a url");
//! let result = client.url("things");
//! assert!(matches!(result, Err(Error::InvalidUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while building or issuing a request.
///
/// Each variant provides a clear, actionable error message. Network-level
/// failures pass through from the underlying transport untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// The built URL string is not syntactically valid.
    ///
    /// Malformed roots fail here lazily, at the first URL build, rather
    /// than at client construction.
    #[error("Invalid URL '{input}'. Check the client root and the request path.")]
    InvalidUrl {
        /// The string that failed to parse.
        input: String,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The request body could not be encoded as JSON.
    #[error("Failed to encode request body as JSON: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Network or connection error from the underlying transport.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response resolver failed to read or decode the response body.
    #[error("Failed to resolve response body: {0}")]
    Resolve(#[source] reqwest::Error),
}
