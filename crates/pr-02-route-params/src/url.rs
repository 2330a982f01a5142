//! # Route URLs
//!
//! Splitting a route into its path and query pairs, and back.

use std::borrow::Cow;
use std::fmt;

use crate::errors::ParamError;

/// Query pairs of a route, in order of appearance.
///
/// Names are stored decoded; values keep their percent-encoded wire form
/// until a reader decodes them into a concrete type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteQuery {
    pairs: Vec<(String, String)>,
}

impl RouteQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair. `encoded_value` must already be percent-encoded.
    pub fn push(&mut self, name: impl Into<String>, encoded_value: impl Into<String>) {
        self.pairs.push((name.into(), encoded_value.into()));
    }

    /// Encoded value of the first pair named `name`.
    pub fn get_raw(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Drop every pair named `name`. Returns whether any was present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(n, _)| n != name);
        self.pairs.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get_raw(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pair names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(n, _)| n.as_str())
    }

    fn parse(raw: &str) -> Result<Self, ParamError> {
        let mut query = RouteQuery::new();
        for segment in raw.split('&').filter(|s| !s.is_empty()) {
            let (name, value) = segment.split_once('=').unwrap_or((segment, ""));
            let name = urlencoding::decode(name).map_err(|e| ParamError::Parse {
                message: format!("parameter name '{name}': {e}"),
            })?;
            if name.is_empty() {
                return Err(ParamError::Parse {
                    message: format!("empty parameter name in '{segment}'"),
                });
            }
            query.push(name.into_owned(), value);
        }
        Ok(query)
    }
}

/// A navigation target: page path plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteUrl {
    path: String,
    query: RouteQuery,
}

impl RouteUrl {
    pub fn new(path: impl Into<String>, query: RouteQuery) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    /// Parse `path?name=value&...`.
    ///
    /// # Errors
    ///
    /// Returns `Parse` when the path is empty or a name is not valid
    /// percent-encoded UTF-8.
    pub fn parse(raw: &str) -> Result<Self, ParamError> {
        let (path, query) = match raw.split_once('?') {
            Some((path, query)) => (path, RouteQuery::parse(query)?),
            None => (raw, RouteQuery::new()),
        };
        if path.is_empty() {
            return Err(ParamError::Parse {
                message: "route path is empty".to_string(),
            });
        }
        Ok(Self::new(path, query))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &RouteQuery {
        &self.query
    }
}

impl fmt::Display for RouteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (name, value)) in self.query.pairs.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            let name: Cow<'_, str> = urlencoding::encode(name);
            write!(f, "{sep}{name}={value}")?;
        }
        Ok(())
    }
}

/// Cut `url` to at most `limit` bytes on a char boundary.
///
/// Models the navigation layer dropping everything past its size limit.
pub fn truncate_to_limit(url: &str, limit: usize) -> &str {
    if url.len() <= limit {
        return url;
    }
    let mut end = limit;
    while !url.is_char_boundary(end) {
        end -= 1;
    }
    &url[..end]
}
