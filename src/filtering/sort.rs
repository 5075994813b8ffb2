//! # Sort Decoding
//!
//! `sort=-created_at,name` decodes to the tokens `["-created_at", "name"]`.
//! [`SortDirective`] splits a token into its column and a `sea_query`
//! [`Order`]: a leading `-` sorts descending, a leading `+` or no prefix sorts
//! ascending.
//!
//! ```
//! use querycrate::{ParameterBag, SortDirective};
//! use querycrate::filtering::decode_sorts;
//!
//! let bag = ParameterBag::from_query_str("sort=-created_at,name");
//! assert_eq!(decode_sorts(&bag, "sort", ","), vec!["-created_at", "name"]);
//!
//! let directive = SortDirective::parse("-created_at").unwrap();
//! assert_eq!(directive.column, "created_at");
//! assert!(directive.is_descending());
//! ```

use sea_orm::sea_query::Order;

use super::{list_tokens, non_empty};
use crate::source::RequestDataSource;

const DESCENDING_PREFIX: char = '-';
const ASCENDING_PREFIX: char = '+';

/// Sort tokens in request order, e.g. `sort=-name,email` -> `["-name", "email"]`.
///
/// Empty tokens are dropped.
#[must_use]
pub fn decode_sorts(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<String> {
    let sorts = non_empty(list_tokens(source, parameter, delimiter));
    tracing::debug!(parameter, count = sorts.len(), "Decoded sorts");
    sorts
}

/// A sort token split into column and direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortDirective {
    pub column: String,
    pub direction: Order,
}

impl SortDirective {
    /// Parse `-column` (descending), `+column` or `column` (ascending).
    ///
    /// Returns `None` when nothing is left after the sign.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        let (column, direction) = if let Some(column) = token.strip_prefix(DESCENDING_PREFIX) {
            (column, Order::Desc)
        } else if let Some(column) = token.strip_prefix(ASCENDING_PREFIX) {
            (column, Order::Asc)
        } else {
            (token, Order::Asc)
        };

        if column.is_empty() {
            return None;
        }

        Some(Self {
            column: column.to_string(),
            direction,
        })
    }

    #[must_use]
    pub const fn is_descending(&self) -> bool {
        matches!(self.direction, Order::Desc)
    }
}

/// [`decode_sorts`], parsed into [`SortDirective`]s.
#[must_use]
pub fn decode_sort_directives(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<SortDirective> {
    decode_sorts(source, parameter, delimiter)
        .iter()
        .filter_map(|token| SortDirective::parse(token))
        .collect()
}
