//! # Filter Value Coercion
//!
//! Filter values arrive as strings, lists and nested maps. Coercion turns the
//! literals `true`/`false` into booleans and splits delimited strings into
//! lists, recursing through containers up to the configured depth:
//!
//! ```
//! use querycrate::{FilterValue, RawValue};
//! use querycrate::filtering::coerce_filter_value;
//!
//! let text = |value: &str| FilterValue::String(value.to_string());
//!
//! assert_eq!(coerce_filter_value(&RawValue::from("true"), ","), FilterValue::Bool(true));
//! assert_eq!(
//!     coerce_filter_value(&RawValue::from("a,b"), ","),
//!     FilterValue::Sequence(vec![text("a"), text("b")])
//! );
//! assert_eq!(coerce_filter_value(&RawValue::from("0"), ","), text("0"));
//! ```

use super::FilterValue;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::value::RawValue;

/// Coerce one filter value.
///
/// Rules, checked in order:
/// 1. Empty values (`Null`, `""`, empty sequence or mapping, `false`) pass
///    through unchanged.
/// 2. Sequences and mappings are coerced element by element.
/// 3. A string containing `delimiter` is split into string pieces. The pieces
///    are not coerced further, so `"true,false"` stays two strings.
/// 4. `"true"` and `"false"` become booleans.
/// 5. Anything else passes through unchanged.
///
/// An empty delimiter never matches, so rule 3 is skipped entirely.
#[must_use]
pub fn coerce_filter_value(value: &RawValue, delimiter: &str) -> FilterValue {
    coerce_filter_value_with_depth(value, delimiter, DEFAULT_MAX_DEPTH)
}

/// [`coerce_filter_value`] with an explicit cap on container nesting.
///
/// `value` itself sits at depth 0. A sequence or mapping at depth `max_depth`
/// or deeper is returned as-is, so `max_depth = 0` leaves container values
/// untouched and `max_depth = 1` coerces only their direct elements.
#[must_use]
pub fn coerce_filter_value_with_depth(value: &RawValue, delimiter: &str, max_depth: usize) -> FilterValue {
    coerce(value, delimiter, 0, max_depth)
}

fn coerce(value: &RawValue, delimiter: &str, depth: usize, max_depth: usize) -> FilterValue {
    if value.is_empty() {
        return FilterValue::from(value.clone());
    }

    match value {
        RawValue::Sequence(_) | RawValue::Mapping(_) if depth >= max_depth => {
            tracing::warn!(depth, max_depth, "Filter value nesting exceeds depth limit, leaving it as-is");
            FilterValue::from(value.clone())
        }
        RawValue::Sequence(items) => FilterValue::Sequence(
            items
                .iter()
                .map(|item| coerce(item, delimiter, depth + 1, max_depth))
                .collect(),
        ),
        RawValue::Mapping(map) => FilterValue::Mapping(
            map.iter()
                .map(|(key, item)| (key, coerce(item, delimiter, depth + 1, max_depth)))
                .collect(),
        ),
        RawValue::String(text) if !delimiter.is_empty() && text.contains(delimiter) => FilterValue::Sequence(
            text.split(delimiter)
                .map(|piece| FilterValue::String(piece.to_string()))
                .collect(),
        ),
        RawValue::String(text) if text == "true" => FilterValue::Bool(true),
        RawValue::String(text) if text == "false" => FilterValue::Bool(false),
        other => FilterValue::from(other.clone()),
    }
}
