//! Relation includes and attribute appends.

use super::{list_tokens, non_empty, split_tokens};
use crate::source::RequestDataSource;
use crate::value::RawValue;

/// Relation names requested through the include parameter.
///
/// Strings are split on `delimiter`, lists are used as sent. Empty names are
/// dropped.
#[must_use]
pub fn decode_includes(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<String> {
    let includes = non_empty(list_tokens(source, parameter, delimiter));
    tracing::debug!(parameter, count = includes.len(), "Decoded includes");
    includes
}

/// Attribute names requested through the append parameter.
///
/// Unlike includes, empty names are kept: `append=a,,b` yields three entries.
/// Any scalar (not just a string) is split on `delimiter`.
#[must_use]
pub fn decode_appends(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<String> {
    let appends = match source.get(parameter) {
        Some(scalar @ (RawValue::Bool(_) | RawValue::Number(_))) => {
            split_tokens(&scalar.scalar_text().unwrap_or_default(), delimiter)
        }
        _ => list_tokens(source, parameter, delimiter),
    };
    tracing::debug!(parameter, count = appends.len(), "Decoded appends");
    appends
}
