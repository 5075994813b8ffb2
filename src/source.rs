//! # Request Data Sources
//!
//! Decoders never see an HTTP request directly. They ask a
//! [`RequestDataSource`] for the raw value stored under a parameter name, which
//! keeps them testable without a server and lets callers plug in whatever
//! request representation they already have.
//!
//! [`ParameterBag`] is the stock implementation. Query strings and form bodies
//! are parsed with `serde_qs` in non-strict mode, so bracket notation works the
//! way PHP, Rack and `qs` clients write it and percent-encoded brackets are
//! accepted:
//!
//! ```rust,ignore
//! // ?filter[status]=active&filter[tags][]=rust&include=posts,comments
//! let bag = ParameterBag::parse_query(uri.query().unwrap_or_default(), 64)?;
//!
//! bag.get("include");          // String("posts,comments")
//! bag.get("filter");           // Mapping { status: "active", tags: ["rust"] }
//! ```
//!
//! A parameter given twice (`sort=a&sort=b`) or written both as a list and as a
//! map (`include[1]=a&include[]=b`) is rejected instead of being silently
//! overwritten.

use std::collections::HashMap;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::errors::QueryError;
use crate::value::{ParameterMap, RawValue};

/// Anything that can hand out raw request parameter values by name.
///
/// Implementations must return values in the shape the client sent them
/// (string, sequence or nested mapping) without flattening.
pub trait RequestDataSource {
    /// Raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&RawValue>;

    /// Raw value stored under `key`, or `default` when missing.
    fn get_or<'a>(&'a self, key: &str, default: &'a RawValue) -> &'a RawValue {
        self.get(key).unwrap_or(default)
    }
}

impl RequestDataSource for HashMap<String, RawValue> {
    fn get(&self, key: &str) -> Option<&RawValue> {
        HashMap::get(self, key)
    }
}

impl RequestDataSource for ParameterMap<RawValue> {
    fn get(&self, key: &str) -> Option<&RawValue> {
        ParameterMap::get(self, key)
    }
}

/// `serde_qs` settings for `max_depth` bracket levels.
fn qs_config(max_depth: usize) -> serde_qs::Config {
    serde_qs::Config::new(max_depth, false)
}

/// Request parameters from the query string and/or body.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterBag {
    params: ParameterMap<RawValue>,
}

impl ParameterBag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL query string (with or without the leading `?`), decoding at
    /// most `max_depth` bracket levels.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidQuery`] when a parameter is repeated or
    /// mixes list and map notation.
    pub fn parse_query(query: &str, max_depth: usize) -> Result<Self, QueryError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        qs_config(max_depth)
            .deserialize_str::<serde_json::Value>(query)
            .map(Self::from_json)
            .map_err(|err| QueryError::invalid_query(&err))
    }

    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::InvalidBody`] under the same conditions as
    /// [`ParameterBag::parse_query`].
    pub fn parse_form(bytes: &[u8], max_depth: usize) -> Result<Self, QueryError> {
        qs_config(max_depth)
            .deserialize_bytes::<serde_json::Value>(bytes)
            .map(Self::from_json)
            .map_err(|err| QueryError::invalid_form(&err))
    }

    /// Parse a URL query string, falling back to an empty bag when it is
    /// malformed.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        Self::from_query_str_with_depth(query, DEFAULT_MAX_DEPTH)
    }

    #[must_use]
    pub fn from_query_str_with_depth(query: &str, max_depth: usize) -> Self {
        Self::parse_query(query, max_depth).unwrap_or_else(|err| {
            tracing::warn!(error = ?err, "Ignoring malformed query string");
            Self::new()
        })
    }

    /// Build from a decoded JSON body. Only objects carry parameters.
    #[must_use]
    pub fn from_json(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(object) => Self {
                params: object
                    .into_iter()
                    .map(|(key, value)| (key, RawValue::from(value)))
                    .collect(),
            },
            other => {
                tracing::debug!(body = %other, "Ignoring non-object JSON body");
                Self::new()
            }
        }
    }

    /// Combine two bags; values in `other` win for keys present in both.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        for (key, value) in other.params {
            self.params.insert(key, value);
        }
        self
    }

    /// Set a top-level parameter, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<RawValue>) {
        self.params.insert(key, value.into());
    }

    /// Builder form of [`ParameterBag::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.params.iter()
    }
}

impl RequestDataSource for ParameterBag {
    fn get(&self, key: &str) -> Option<&RawValue> {
        self.params.get(key)
    }
}
