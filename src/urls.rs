//! URL building and query parameters.
//!
//! This module joins a client root and a relative resource path into one
//! normalized absolute URL, and provides the ordered [`Query`] type appended
//! to GET request URLs.
//!
//! # Normalization
//!
//! The root and path are concatenated with a single separating slash, then
//! any run of consecutive slashes or backslashes collapses to a single `/`.
//! The scheme separator is the one exception: the two slashes immediately
//! after a `:` survive, so `https://host//a///b` becomes `https://host/a/b`
//! with the `://` intact.
//!
//! The result is parsed with the `url` crate; a string that does not parse
//! surfaces as [`Error::InvalidUrl`] to the caller.

use url::Url;

use crate::error::Error;

/// An ordered list of query parameters.
///
/// Insertion order determines the order the pairs appear in the query
/// string. Values are coerced to strings via [`ToString`].
///
/// # Example
///
/// ```rust
/// use restpoint::Query;
///
/// let query = Query::new().pair("id", 1).pair("name", "r");
/// let pairs: Vec<_> = query.iter().collect();
/// assert_eq!(pairs, [("id", "1"), ("name", "r")]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);

impl Query {
    /// Creates an empty query.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a key/value pair, coercing the value to a string.
    #[must_use]
    pub fn pair(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Returns `true` if the query holds no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.to_string()))
                .collect(),
        )
    }
}

/// Joins `root` and `path`, normalizes separators, parses the result, and
/// appends `query` in insertion order with percent-encoding.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if the normalized string is not a valid
/// absolute URL.
pub(crate) fn build_url(root: &str, path: &str, query: &Query) -> Result<Url, Error> {
    let normalized = collapse_separators(&format!("{root}/{path}"));

    let mut url = Url::parse(&normalized).map_err(|source| Error::InvalidUrl {
        input: normalized.clone(),
        source,
    })?;

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query.iter() {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Collapses every run of `/` and `\` into a single `/`, except directly
/// after a `:`, where two slashes survive as the scheme separator.
fn collapse_separators(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    let mut after_colon = false;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' || c == '\\' {
            while matches!(chars.peek(), Some('/' | '\\')) {
                chars.next();
            }
            output.push_str(if after_colon { "//" } else { "/" });
            after_colon = false;
        } else {
            after_colon = c == ':';
            output.push(c);
        }
    }

    output
}
