//! The request client.
//!
//! This module provides the [`RequestClient`] type: a thin convenience layer
//! over `reqwest` that owns a root URL and a set of default behaviors, and
//! exposes verb helpers (`get`, `post`, `put`, `delete`) that build a target
//! URL, layer options, issue exactly one HTTP call, and route the outcome
//! through a single resolution step.
//!
//! # Resolution
//!
//! Every response passes through one decision point. A status below 400 is
//! handed to the client's resolver, whose output becomes
//! [`Resolution::Success`]. A status of 400 or above invokes the error
//! handler for its side effect and returns the raw, unconsumed response as
//! [`Resolution::Error`]. HTTP-level failure is therefore not an `Err`:
//! transport-layer success with an application-level error status is not an
//! exceptional control-flow event.
//!
//! # Thread Safety
//!
//! `RequestClient` is `Send + Sync` and cheap to [`Clone`] (the underlying
//! connection pool and stored callables are shared), so one configured
//! client can serve many simultaneous in-flight requests.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::{Method, Response, StatusCode};
use url::Url;

use crate::auth::Authorization;
use crate::error::Error;
use crate::options::{Body, TransportOptions};
use crate::urls::{build_url, Query};

/// Default `Content-Type` header value.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// A stored response resolver: applied to every response with a status
/// below 400 to produce the caller-visible result.
pub type Resolver<T> =
    Arc<dyn Fn(Response) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// A stored error handler: invoked with the status code and a reference to
/// the raw response for every status of 400 or above. Side effect only; the
/// return value is discarded and the response stays unconsumed.
pub type ErrorHandler = Arc<dyn Fn(StatusCode, &Response) + Send + Sync>;

/// The outcome of a resolved request.
///
/// Callers branch on the variant to detect HTTP-level failure: a resolver
/// result on success, the raw response on an error status.
///
/// # Example
///
/// ```rust,ignore
/// match client.get("things", None, None).await? {
///     Resolution::Success(body) => println!("got {body}"),
///     Resolution::Error(response) => eprintln!("status {}", response.status()),
/// }
/// ```
#[derive(Debug)]
pub enum Resolution<T> {
    /// The response status was below 400; holds the resolver's output.
    Success(T),
    /// The response status was 400 or above; holds the raw, unconsumed
    /// response. The error handler has already run.
    Error(Response),
}

impl<T> Resolution<T> {
    /// Returns `true` for [`Success`](Self::Success).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns `true` for [`Error`](Self::Error).
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Returns the resolver output, if any.
    #[must_use]
    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Error(_) => None,
        }
    }

    /// Returns the raw error response, if any.
    #[must_use]
    pub fn error_response(self) -> Option<Response> {
        match self {
            Self::Success(_) => None,
            Self::Error(response) => Some(response),
        }
    }

    /// Converts into a `Result`, with the raw response as the error side.
    ///
    /// # Errors
    ///
    /// Returns the raw response for [`Error`](Self::Error) resolutions.
    pub fn into_result(self) -> Result<T, Response> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Error(response) => Err(response),
        }
    }
}

/// A thin async client for JSON-oriented REST APIs.
///
/// The client owns a root URL and a set of defaults: an optional
/// authorization source, a content type, base transport options, a response
/// resolver, and an error handler. Verb helpers resolve a relative path
/// against the root, layer per-call options over the defaults, and issue
/// exactly one HTTP call. No retries, no timeout enforcement, no caching.
///
/// The type parameter `T` is the resolver's output; the default resolver
/// parses the response body as JSON into a [`serde_json::Value`].
///
/// # Example
///
/// ```rust,ignore
/// use restpoint::RequestClient;
///
/// let client = RequestClient::builder("https://api.example.com/v1")
///     .authorization("Bearer my-token")
///     .build();
///
/// let things = client.get("things", None, None).await?;
/// ```
pub struct RequestClient<T = serde_json::Value> {
    /// The internal reqwest HTTP client.
    client: reqwest::Client,
    /// Root URL all relative request paths are resolved against.
    root: String,
    /// Authorization header source, resolved freshly per request.
    authorization: Option<Authorization>,
    /// Default `Content-Type` header value.
    content_type: String,
    /// Transport options applied to every request unless overridden.
    default_options: TransportOptions,
    /// Applied to responses with a status below 400.
    resolver: Resolver<T>,
    /// Invoked for responses with a status of 400 or above.
    error_handler: ErrorHandler,
}

// Verify RequestClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestClient>();
};

/// The default resolver: parse the body as JSON.
fn json_resolver() -> Resolver<serde_json::Value> {
    Arc::new(|response| {
        Box::pin(async move {
            response
                .json::<serde_json::Value>()
                .await
                .map_err(Error::Resolve)
        })
    })
}

/// The default error handler: log the status and URL through `tracing`.
fn warn_handler() -> ErrorHandler {
    Arc::new(|status, response| {
        tracing::warn!(
            status = status.as_u16(),
            url = %response.url(),
            "request resolved to an error status"
        );
    })
}

impl RequestClient<serde_json::Value> {
    /// Creates a client with all defaults: no authorization, JSON content
    /// type, a JSON-parsing resolver, and a logging error handler.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self::builder(root).build()
    }

    /// Creates a builder for a client with non-default options.
    #[must_use]
    pub fn builder(root: impl Into<String>) -> RequestClientBuilder {
        RequestClientBuilder::new(root)
    }
}

impl<T> RequestClient<T> {
    /// Returns the root URL.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Returns the default `Content-Type` header value.
    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Returns the default transport options.
    #[must_use]
    pub const fn default_options(&self) -> &TransportOptions {
        &self.default_options
    }

    /// Returns the authorization source, if configured.
    #[must_use]
    pub const fn authorization(&self) -> Option<&Authorization> {
        self.authorization.as_ref()
    }

    /// Resolves a relative path against the root into an absolute URL.
    ///
    /// Useful with [`request`](Self::request) for methods not covered by
    /// the verb helpers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the joined string does not parse.
    pub fn url(&self, path: &str) -> Result<Url, Error> {
        build_url(&self.root, path, &Query::new())
    }

    /// Sends a GET request to the given path.
    ///
    /// Query pairs are appended to the URL in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse, or
    /// [`Error::Transport`]/[`Error::Resolve`] per [`request`](Self::request).
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let listing = client
    ///     .get("things", Some(Query::new().pair("limit", 50)), None)
    ///     .await?;
    /// ```
    pub async fn get(
        &self,
        path: &str,
        query: Option<Query>,
        options: Option<TransportOptions>,
    ) -> Result<Resolution<T>, Error> {
        let url = build_url(&self.root, path, &query.unwrap_or_default())?;
        let verb = TransportOptions::new().method(Method::GET);
        self.dispatch(url, verb.layered_with(options.unwrap_or_default()))
            .await
    }

    /// Sends a POST request to the given path.
    ///
    /// String bodies pass through verbatim; JSON-valued bodies are encoded
    /// as JSON text at send time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse,
    /// [`Error::Serialize`] if a JSON body fails to encode, or
    /// [`Error::Transport`]/[`Error::Resolve`] per [`request`](Self::request).
    pub async fn post(
        &self,
        path: &str,
        body: impl Into<Body>,
        options: Option<TransportOptions>,
    ) -> Result<Resolution<T>, Error> {
        let url = build_url(&self.root, path, &Query::new())?;
        let verb = TransportOptions::new().method(Method::POST).body(body);
        self.dispatch(url, verb.layered_with(options.unwrap_or_default()))
            .await
    }

    /// Sends a PUT request to the given path.
    ///
    /// Unlike [`post`](Self::post), the body is always JSON-encoded: a
    /// string input goes on the wire JSON-quoted. Byte bodies have no JSON
    /// text form and pass through unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse,
    /// [`Error::Serialize`] if the body fails to encode, or
    /// [`Error::Transport`]/[`Error::Resolve`] per [`request`](Self::request).
    pub async fn put(
        &self,
        path: &str,
        body: impl Into<Body>,
        options: Option<TransportOptions>,
    ) -> Result<Resolution<T>, Error> {
        let url = build_url(&self.root, path, &Query::new())?;
        let body = match body.into() {
            Body::Text(text) => Body::Json(serde_json::Value::String(text)),
            other => other,
        };
        let verb = TransportOptions::new().method(Method::PUT).body(body);
        self.dispatch(url, verb.layered_with(options.unwrap_or_default()))
            .await
    }

    /// Sends a DELETE request to the given path.
    ///
    /// No body is sent by default; pass options with a body set to send
    /// one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if the URL does not parse, or
    /// [`Error::Transport`]/[`Error::Resolve`] per [`request`](Self::request).
    pub async fn delete(
        &self,
        path: &str,
        options: Option<TransportOptions>,
    ) -> Result<Resolution<T>, Error> {
        let url = build_url(&self.root, path, &Query::new())?;
        let verb = TransportOptions::new().method(Method::DELETE);
        self.dispatch(url, verb.layered_with(options.unwrap_or_default()))
            .await
    }

    /// Sends a request to an absolute URL.
    ///
    /// This is the low-level escape hatch behind every verb helper, also
    /// usable directly for methods they do not cover (PATCH, HEAD, ...) by
    /// setting `method` in the options. Defaults to GET when no method is
    /// set anywhere.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `url` does not parse,
    /// [`Error::Serialize`] if a JSON body fails to encode,
    /// [`Error::Transport`] on network-level failure, or whatever the
    /// resolver returns (the default resolver fails with
    /// [`Error::Resolve`]).
    pub async fn request(
        &self,
        url: impl AsRef<str>,
        options: Option<TransportOptions>,
    ) -> Result<Resolution<T>, Error> {
        let url = Url::parse(url.as_ref()).map_err(|source| Error::InvalidUrl {
            input: url.as_ref().to_string(),
            source,
        })?;
        self.dispatch(url, options.unwrap_or_default()).await
    }

    /// Layers options, issues exactly one network call, and resolves the
    /// response.
    ///
    /// Precedence, lowest to highest: client default options, synthesized
    /// `Content-Type`/`Authorization` headers, per-call options. The
    /// synthesized headers sit between the two so a per-call header of the
    /// same name always wins, while the synthesized values win over generic
    /// client-level defaults.
    async fn dispatch(
        &self,
        url: Url,
        per_call: TransportOptions,
    ) -> Result<Resolution<T>, Error> {
        let mut synthesized =
            TransportOptions::new().header("content-type", self.content_type.clone());
        if let Some(authorization) = &self.authorization {
            // Fresh resolution on every request
            synthesized = synthesized.header("authorization", authorization.header_value());
        }

        let merged = self
            .default_options
            .clone()
            .layered_with(synthesized)
            .layered_with(per_call);

        let method = merged.method.unwrap_or(Method::GET);
        let mut builder = self.client.request(method, url);
        for (name, value) in &merged.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = merged.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(body) = merged.body {
            builder = match body {
                Body::Text(text) => builder.body(text),
                Body::Json(value) => builder.body(serde_json::to_string(&value)?),
                Body::Bytes(bytes) => builder.body(bytes),
            };
        }

        let response = builder.send().await?;
        self.resolve(response).await
    }

    /// Single decision point after every request.
    async fn resolve(&self, response: Response) -> Result<Resolution<T>, Error> {
        let status = response.status();
        if status.as_u16() >= 400 {
            (self.error_handler)(status, &response);
            return Ok(Resolution::Error(response));
        }
        Ok(Resolution::Success((self.resolver)(response).await?))
    }
}

impl<T> Clone for RequestClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            root: self.root.clone(),
            authorization: self.authorization.clone(),
            content_type: self.content_type.clone(),
            default_options: self.default_options.clone(),
            resolver: Arc::clone(&self.resolver),
            error_handler: Arc::clone(&self.error_handler),
        }
    }
}

impl<T> fmt::Debug for RequestClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestClient")
            .field("root", &self.root)
            .field("authorization", &self.authorization)
            .field("content_type", &self.content_type)
            .field("default_options", &self.default_options)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RequestClient`] instances.
///
/// All options have defaults; `build` is infallible. Replacing the resolver
/// may change the client's type parameter.
///
/// # Example
///
/// ```rust
/// use restpoint::{Error, RequestClient};
///
/// let client = RequestClient::builder("https://api.example.com")
///     .authorization("Bearer token")
///     .content_type("application/vnd.api+json")
///     .resolver(|response| async move { response.text().await.map_err(Error::Resolve) })
///     .build();
/// ```
pub struct RequestClientBuilder<T = serde_json::Value> {
    root: String,
    authorization: Option<Authorization>,
    content_type: Option<String>,
    transport: TransportOptions,
    resolver: Resolver<T>,
    error_handler: ErrorHandler,
}

impl RequestClientBuilder<serde_json::Value> {
    /// Creates a builder with the JSON resolver and logging error handler
    /// installed.
    fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            authorization: None,
            content_type: None,
            transport: TransportOptions::new(),
            resolver: json_resolver(),
            error_handler: warn_handler(),
        }
    }
}

impl<T> RequestClientBuilder<T> {
    /// Sets the authorization source: a literal header value or an
    /// [`Authorization::resolver`] invoked freshly per request.
    #[must_use]
    pub fn authorization(mut self, authorization: impl Into<Authorization>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }

    /// Sets the default `Content-Type` header value.
    ///
    /// An empty value falls back to `application/json` at build time.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the default transport options applied to every request unless
    /// overridden per call.
    #[must_use]
    pub fn transport(mut self, options: TransportOptions) -> Self {
        self.transport = options;
        self
    }

    /// Replaces the response resolver, changing the client's result type.
    ///
    /// The resolver receives ownership of the response and may consume the
    /// body; it runs only for statuses below 400.
    #[must_use]
    pub fn resolver<U, F, Fut>(self, resolve: F) -> RequestClientBuilder<U>
    where
        F: Fn(Response) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<U, Error>> + Send + 'static,
    {
        let resolver: Resolver<U> = Arc::new(move |response| Box::pin(resolve(response)));
        RequestClientBuilder {
            root: self.root,
            authorization: self.authorization,
            content_type: self.content_type,
            transport: self.transport,
            resolver,
            error_handler: self.error_handler,
        }
    }

    /// Replaces the error handler invoked for statuses of 400 or above.
    ///
    /// The handler runs for its side effect only and must not consume the
    /// body; the raw response is returned to the caller afterwards. Pass
    /// `|_, _| {}` for silence.
    #[must_use]
    pub fn error_handler(
        mut self,
        handle: impl Fn(StatusCode, &Response) + Send + Sync + 'static,
    ) -> Self {
        self.error_handler = Arc::new(handle);
        self
    }

    /// Builds the client.
    ///
    /// An unset or empty content type falls back to `application/json`;
    /// nothing else is validated here. A malformed root fails lazily at the
    /// first URL build.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This
    /// should only happen in extremely unusual circumstances (e.g., TLS
    /// initialization failure).
    #[must_use]
    pub fn build(self) -> RequestClient<T> {
        let content_type = self
            .content_type
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        RequestClient {
            client,
            root: self.root,
            authorization: self.authorization,
            content_type,
            default_options: self.transport,
            resolver: self.resolver,
            error_handler: self.error_handler,
        }
    }
}

impl<T> fmt::Debug for RequestClientBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestClientBuilder")
            .field("root", &self.root)
            .field("authorization", &self.authorization)
            .field("content_type", &self.content_type)
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
