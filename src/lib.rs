//! # restpoint
//!
//! A thin async convenience layer over `reqwest` for JSON-oriented REST
//! APIs: per-instance default headers, body serialization, and response
//! resolution, with none of the framework weight.
//!
//! ## Overview
//!
//! One component: [`RequestClient`]. It owns a root URL and a set of
//! default behaviors, and exposes verb helpers (`get`, `post`, `put`,
//! `delete`) that build a target URL, layer options, issue exactly one
//! HTTP call, and route the outcome through a single resolution step.
//!
//! - URLs: root and path join with collapsed separators; GET queries append
//!   in insertion order ([`Query`]).
//! - Options: client defaults, synthesized `Content-Type`/`Authorization`
//!   headers, and per-call [`TransportOptions`] layer with a fixed
//!   precedence order, per-call winning.
//! - Authorization: a literal value or a per-request resolver for rotating
//!   credentials ([`Authorization`]).
//! - Resolution: statuses below 400 go through a pluggable resolver;
//!   statuses of 400 and above invoke the error handler and hand back the
//!   raw response ([`Resolution`]).
//!
//! Deliberately out of scope: connection pooling beyond the transport's
//! own, retries, timeout enforcement, streaming helpers, request queuing,
//! token refresh, pagination. One attempt, one outcome, full transparency
//! to the caller.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use restpoint::{Query, RequestClient, Resolution};
//!
//! let client = RequestClient::builder("https://api.example.com/v1")
//!     .authorization("Bearer my-token")
//!     .build();
//!
//! // GET with an ordered query string
//! let listing = client
//!     .get("things", Some(Query::new().pair("limit", 50)), None)
//!     .await?;
//!
//! // POST a JSON body
//! let created = client
//!     .post("things", serde_json::json!({"name": "widget"}), None)
//!     .await?;
//!
//! match created {
//!     Resolution::Success(body) => println!("created: {body}"),
//!     Resolution::Error(response) => eprintln!("failed: {}", response.status()),
//! }
//! ```
//!
//! ## Rotating credentials
//!
//! ```rust
//! use restpoint::{Authorization, RequestClient};
//!
//! let client = RequestClient::builder("https://api.example.com")
//!     .authorization(Authorization::resolver(|| {
//!         // Re-evaluated on every request
//!         format!("Bearer {}", "token-from-somewhere")
//!     }))
//!     .build();
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod options;
pub mod urls;

pub use auth::Authorization;
pub use client::{
    ErrorHandler, RequestClient, RequestClientBuilder, Resolution, Resolver,
    DEFAULT_CONTENT_TYPE,
};
pub use error::Error;
pub use options::{Body, TransportOptions};
pub use urls::Query;
