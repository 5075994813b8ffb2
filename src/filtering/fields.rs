//! Sparse fieldsets.
//!
//! `fields=id,name,posts.title` selects columns, optionally qualified by
//! table. The per-table form `fields[users]=id,name` qualifies every listed
//! column with the key it was sent under.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use sea_orm::sea_query::{Alias, ColumnRef, IntoColumnRef};

use super::split_tokens;
use crate::source::RequestDataSource;
use crate::value::RawValue;

/// A possibly table-qualified column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    pub table: Option<String>,
    pub name: String,
}

impl Column {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            table: None,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn with_table(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Build from a fields token. The table is everything before the last `.`.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token.rsplit_once('.') {
            Some((table, name)) => Self::with_table(table, name),
            None => Self::new(token),
        }
    }

    /// Like [`Column::from_token`], but an unqualified token gets `table`.
    #[must_use]
    pub fn qualify(table: &str, token: &str) -> Self {
        if token.contains('.') {
            Self::from_token(token)
        } else {
            Self::with_table(table, token)
        }
    }

    /// `table.name`, or just `name`.
    #[must_use]
    pub fn qualified(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.table {
            Some(table) => write!(f, "{table}.{}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for Column {
    type Err = Infallible;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_token(token))
    }
}

impl IntoColumnRef for Column {
    fn into_column_ref(self) -> ColumnRef {
        match self.table {
            Some(table) => (Alias::new(table), Alias::new(self.name)).into_column_ref(),
            None => Alias::new(self.name).into_column_ref(),
        }
    }
}

/// Columns requested through the fields parameter.
///
/// An empty or missing parameter yields nothing. Empty tokens are kept, so
/// `fields=id,` yields a column with an empty name.
#[must_use]
pub fn decode_fields(source: &impl RequestDataSource, parameter: &str, delimiter: &str) -> Vec<Column> {
    let Some(raw) = source.get(parameter).filter(|raw| !raw.is_empty()) else {
        return Vec::new();
    };

    let columns: Vec<Column> = match raw {
        RawValue::Mapping(tables) => tables
            .iter()
            .flat_map(|(table, value)| {
                field_tokens(parameter, value, delimiter)
                    .into_iter()
                    .map(move |token| Column::qualify(table, &token))
            })
            .collect(),
        other => field_tokens(parameter, other, delimiter)
            .iter()
            .map(|token| Column::from_token(token))
            .collect(),
    };

    tracing::debug!(parameter, count = columns.len(), "Decoded fields");
    columns
}

fn field_tokens(parameter: &str, value: &RawValue, delimiter: &str) -> Vec<String> {
    match value {
        RawValue::Sequence(items) => items
            .iter()
            .flat_map(|item| field_tokens(parameter, item, delimiter))
            .collect(),
        RawValue::Mapping(_) => {
            tracing::debug!(parameter, "Dropping nested mapping from fields parameter");
            Vec::new()
        }
        scalar => split_tokens(&scalar.scalar_text().unwrap_or_default(), delimiter),
    }
}
