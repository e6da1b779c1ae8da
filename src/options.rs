//! Transport options and request bodies.
//!
//! This module provides the [`TransportOptions`] type describing the options
//! handed to the underlying transport for a single request, and the [`Body`]
//! enum distinguishing verbatim text, JSON-encoded values, and raw bytes.
//!
//! # Layering
//!
//! Options merge with [`TransportOptions::layered_with`]: the overlay's set
//! fields win, and headers merge per key with the overlay winning on
//! conflicts. The client layers three levels for every request, lowest to
//! highest precedence: its default options, the synthesized
//! `Content-Type`/`Authorization` headers, and the per-call options.
//!
//! # Example
//!
//! ```rust
//! use restpoint::TransportOptions;
//! use reqwest::Method;
//!
//! let defaults = TransportOptions::new().header("Accept", "application/json");
//! let per_call = TransportOptions::new().method(Method::PATCH);
//!
//! let merged = defaults.layered_with(per_call);
//! assert_eq!(merged.method, Some(Method::PATCH));
//! assert_eq!(merged.headers.get("accept").map(String::as_str), Some("application/json"));
//! ```

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;

use crate::error::Error;

/// A request body.
///
/// The variant decides how the payload goes on the wire:
///
/// - [`Text`](Self::Text): sent verbatim.
/// - [`Json`](Self::Json): encoded as JSON text at send time.
/// - [`Bytes`](Self::Bytes): sent as-is, byte for byte.
///
/// # Example
///
/// ```rust
/// use restpoint::Body;
/// use serde_json::json;
///
/// let text: Body = "raw payload".into();
/// let json: Body = json!({"name": "thing"}).into();
/// let bytes: Body = vec![0x01, 0x02].into();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// Text sent verbatim, without any encoding step.
    Text(String),
    /// A JSON value encoded to text at send time.
    Json(serde_json::Value),
    /// Raw bytes sent unchanged.
    Bytes(Vec<u8>),
}

impl Body {
    /// Encodes any serializable value as a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if the value cannot be represented as
    /// JSON (e.g., a map with non-string keys).
    pub fn serialize<T: Serialize>(value: &T) -> Result<Self, Error> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl From<Vec<u8>> for Body {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

/// Options handed to the underlying transport for a single request.
///
/// All fields are public and optional; unset fields fall back to lower
/// layers when options merge. Use the fluent setters for the common case.
///
/// # Example
///
/// ```rust
/// use restpoint::TransportOptions;
/// use reqwest::Method;
/// use std::time::Duration;
///
/// let options = TransportOptions::new()
///     .method(Method::DELETE)
///     .header("X-Request-Source", "cleanup-job")
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransportOptions {
    /// The HTTP method, overriding whatever the verb helper chose.
    pub method: Option<Method>,
    /// Headers for this request. Names compare case-insensitively; they are
    /// folded to ASCII lowercase when layers merge.
    pub headers: HashMap<String, String>,
    /// The request body, overriding whatever the verb helper built.
    pub body: Option<Body>,
    /// Per-request timeout, forwarded to the transport. The client itself
    /// enforces nothing.
    pub timeout: Option<Duration>,
}

impl TransportOptions {
    /// Creates an empty set of options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Adds a single header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets all headers at once, replacing any previously added.
    #[must_use]
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Body>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Merges `overlay` on top of `self`, with `overlay` winning.
    ///
    /// Set scalar fields (`method`, `body`, `timeout`) in the overlay replace
    /// those in `self`; unset fields fall through. Headers merge per key,
    /// with names folded to ASCII lowercase so that, e.g., a per-call
    /// `content-type` overrides a synthesized `Content-Type`.
    ///
    /// This is an explicit layered merge, not falsy coalescing: a set-but-
    /// empty value in the overlay (such as an intentionally empty header)
    /// still wins.
    #[must_use]
    pub fn layered_with(self, overlay: Self) -> Self {
        let mut headers: HashMap<String, String> = self
            .headers
            .into_iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), value))
            .collect();
        for (name, value) in overlay.headers {
            headers.insert(name.to_ascii_lowercase(), value);
        }

        Self {
            method: overlay.method.or(self.method),
            headers,
            body: overlay.body.or(self.body),
            timeout: overlay.timeout.or(self.timeout),
        }
    }
}
