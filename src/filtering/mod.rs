//! # Query Intent Decoding
//!
//! Five independent decoders turn raw request parameters into something a
//! query builder can use:
//!
//! | Parameter | Decoder | Result |
//! |-----------|---------|--------|
//! | `include` | [`decode_includes`] | relation names |
//! | `append`  | [`decode_appends`] | attribute names |
//! | `fields`  | [`decode_fields`] | [`Column`] references |
//! | `sort`    | [`decode_sorts`] / [`decode_sort_directives`] | sort tokens |
//! | `filter`  | [`decode_filters`] | [`FilterMap`] |
//!
//! ## Query Parameter Examples
//!
//! ```rust,ignore
//! // Relations, comma separated or as a list
//! GET /users?include=posts,comments
//! GET /users?include[]=posts&include[]=comments
//!
//! // Sparse fieldsets, flat or per table
//! GET /users?fields=id,name,posts.title
//! GET /users?fields[users]=id,name
//!
//! // Sorting, `-` for descending
//! GET /users?sort=-created_at,name
//!
//! // Filters: lists split on the delimiter, "true"/"false" become booleans
//! GET /users?filter[status]=active,pending&filter[verified]=true
//! ```
//!
//! None of the decoders fail. A missing parameter, or one in a shape the
//! decoder does not understand, decodes to an empty result.

pub mod coerce;
pub mod fields;
pub mod relations;
pub mod sort;

use serde::Serialize;

use crate::config::DEFAULT_MAX_DEPTH;
use crate::source::RequestDataSource;
use crate::value::{ParameterMap, RawValue};

pub use coerce::{coerce_filter_value, coerce_filter_value_with_depth};
pub use fields::{Column, decode_fields};
pub use relations::{decode_appends, decode_includes};
pub use sort::{SortDirective, decode_sort_directives, decode_sorts};

/// A coerced filter value.
///
/// Serializes untagged, so a decoded filter map renders as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<FilterValue>),
    Mapping(ParameterMap<FilterValue>),
}

impl FilterValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_sequence(&self) -> Option<&[FilterValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }
}

impl From<RawValue> for FilterValue {
    fn from(value: RawValue) -> Self {
        match value {
            RawValue::Null => Self::Null,
            RawValue::Bool(value) => Self::Bool(value),
            RawValue::Number(number) => Self::Number(number),
            RawValue::String(value) => Self::String(value),
            RawValue::Sequence(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            RawValue::Mapping(map) => Self::Mapping(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Filter name to coerced value, in request order.
pub type FilterMap = ParameterMap<FilterValue>;

/// Decode the filter parameter into a [`FilterMap`].
///
/// The parameter must be a mapping (`filter[name]=value`). A bare
/// `filter=value` string means "no filters". A list (`filter[]=a`) is keyed by
/// position.
///
/// Each filter value is coerced with
/// [`coerce_filter_value_with_depth`],
/// so `max_depth` counts container levels from the filter value itself.
#[must_use]
pub fn decode_filters(
    source: &impl RequestDataSource,
    parameter: &str,
    delimiter: &str,
    max_depth: usize,
) -> FilterMap {
    let filters: FilterMap = match source.get(parameter) {
        Some(RawValue::Mapping(map)) => map
            .iter()
            .map(|(name, value)| (name, coerce_filter_value_with_depth(value, delimiter, max_depth)))
            .collect(),
        Some(RawValue::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(index, value)| {
                (index.to_string(), coerce_filter_value_with_depth(value, delimiter, max_depth))
            })
            .collect(),
        Some(other) => {
            tracing::debug!(parameter, value = ?other, "Filter parameter is not a mapping, ignoring");
            FilterMap::new()
        }
        None => FilterMap::new(),
    };

    tracing::debug!(parameter, count = filters.len(), "Decoded filters");
    filters
}

/// [`decode_filters`] with the default depth limit.
#[must_use]
pub fn decode_filters_default_depth(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> FilterMap {
    decode_filters(source, parameter, delimiter, DEFAULT_MAX_DEPTH)
}

/// Split a delimited string.
///
/// An empty delimiter yields one token per character.
pub(crate) fn split_tokens(value: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return value.chars().map(String::from).collect();
    }
    value.split(delimiter).map(str::to_string).collect()
}

/// Textual form of each scalar element; nested containers are dropped.
pub(crate) fn element_tokens<'a>(parameter: &str, items: impl Iterator<Item = &'a RawValue>) -> Vec<String> {
    items
        .filter_map(|item| {
            let token = item.scalar_text();
            if token.is_none() {
                tracing::debug!(parameter, "Dropping nested value from list parameter");
            }
            token
        })
        .collect()
}

/// Tokens for include-style parameters: strings are split, lists are taken
/// as-is, other scalars become a single token.
pub(crate) fn list_tokens(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<String> {
    match source.get(parameter) {
        None | Some(RawValue::Null) => Vec::new(),
        Some(RawValue::String(value)) => split_tokens(value, delimiter),
        Some(RawValue::Sequence(items)) => element_tokens(parameter, items.iter()),
        Some(RawValue::Mapping(map)) => element_tokens(parameter, map.values()),
        Some(scalar @ (RawValue::Bool(_) | RawValue::Number(_))) => scalar.scalar_text().into_iter().collect(),
    }
}

/// Drop empty tokens.
pub(crate) fn non_empty(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|token| !token.is_empty()).collect()
}
