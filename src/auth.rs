//! Authorization header sources.
//!
//! This module provides the [`Authorization`] enum, the value placed in the
//! `Authorization` header of every request issued by a
//! [`RequestClient`](crate::RequestClient).
//!
//! # Static vs. resolved values
//!
//! - [`Static`](Authorization::Static): a fixed header value, used as-is on
//!   every request.
//! - [`Resolver`](Authorization::Resolver): a zero-argument callable invoked
//!   freshly on every request. This supports expiring or rotating credentials
//!   without reconstructing the client.
//!
//! # Security
//!
//! The [`Debug`] implementation masks the credential, preventing accidental
//! exposure in logs.
//!
//! # Example
//!
//! ```rust
//! use restpoint::Authorization;
//!
//! let fixed = Authorization::from("Bearer abc123");
//! assert_eq!(fixed.header_value(), "Bearer abc123");
//!
//! let rotating = Authorization::resolver(|| format!("Bearer {}", "fresh-token"));
//! assert_eq!(rotating.header_value(), "Bearer fresh-token");
//!
//! // Debug output masks the credential
//! assert_eq!(format!("{:?}", fixed), "Authorization::Static(*****)");
//! ```

use std::fmt;
use std::sync::Arc;

/// The source of the `Authorization` header value.
///
/// Resolution never mutates client state: the resolver variant stores a
/// shared `Fn` closure, so any rotating-token bookkeeping lives behind the
/// caller's own interior mutability.
#[derive(Clone)]
pub enum Authorization {
    /// A literal header value used verbatim on every request.
    Static(String),
    /// A callable invoked with no arguments on every request; its return
    /// value becomes the header value for that request.
    Resolver(Arc<dyn Fn() -> String + Send + Sync>),
}

// Verify Authorization is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Authorization>();
};

impl Authorization {
    /// Creates a resolver-backed authorization source.
    ///
    /// The closure is invoked once per request, immediately before the
    /// request is sent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restpoint::Authorization;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use std::sync::Arc;
    ///
    /// let calls = Arc::new(AtomicUsize::new(0));
    /// let auth = Authorization::resolver({
    ///     let calls = Arc::clone(&calls);
    ///     move || format!("Bearer token-{}", calls.fetch_add(1, Ordering::SeqCst))
    /// });
    ///
    /// assert_eq!(auth.header_value(), "Bearer token-0");
    /// assert_eq!(auth.header_value(), "Bearer token-1");
    /// ```
    pub fn resolver(resolve: impl Fn() -> String + Send + Sync + 'static) -> Self {
        Self::Resolver(Arc::new(resolve))
    }

    /// Returns the header value for the current request.
    ///
    /// For [`Static`](Self::Static) values this is the stored string; for
    /// [`Resolver`](Self::Resolver) values the callable is invoked afresh.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            Self::Static(value) => value.clone(),
            Self::Resolver(resolve) => resolve(),
        }
    }
}

impl From<String> for Authorization {
    fn from(value: String) -> Self {
        Self::Static(value)
    }
}

impl From<&str> for Authorization {
    fn from(value: &str) -> Self {
        Self::Static(value.to_string())
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => f.write_str("Authorization::Static(*****)"),
            Self::Resolver(_) => f.write_str("Authorization::Resolver(*****)"),
        }
    }
}
