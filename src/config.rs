//! # Query Parameter Configuration
//!
//! Parameter names and list delimiters used by the decoders. Everything here is
//! a plain value: build one [`QueryConfig`] at startup, register it on the
//! router, and every request works against its own clone.
//!
//! ```rust,ignore
//! use axum::{Extension, Router, routing::get};
//! use querycrate::QueryConfig;
//!
//! let config = QueryConfig::default().with_delimiter("|");
//!
//! let app: Router = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(Extension(config));
//! ```
//!
//! All types deserialize with defaults for any missing field, so a partial
//! document is enough:
//!
//! ```json
//! { "parameters": { "filter": "where" }, "delimiters": { "sort": ";" } }
//! ```

use serde::{Deserialize, Serialize};

/// Default separator for every list-shaped parameter.
pub const DEFAULT_DELIMITER: &str = ",";

/// Default cap on nesting depth, for both bracket parsing and filter coercion.
pub const DEFAULT_MAX_DEPTH: usize = 64;

fn default_include() -> String {
    "include".to_string()
}

fn default_append() -> String {
    "append".to_string()
}

fn default_fields() -> String {
    "fields".to_string()
}

fn default_sort() -> String {
    "sort".to_string()
}

fn default_filter() -> String {
    "filter".to_string()
}

fn default_delimiter() -> String {
    DEFAULT_DELIMITER.to_string()
}

const fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// Names of the request parameters each decoder reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterNames {
    #[serde(default = "default_include")]
    pub include: String,
    #[serde(default = "default_append")]
    pub append: String,
    #[serde(default = "default_fields")]
    pub fields: String,
    #[serde(default = "default_sort")]
    pub sort: String,
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for ParameterNames {
    fn default() -> Self {
        Self {
            include: default_include(),
            append: default_append(),
            fields: default_fields(),
            sort: default_sort(),
            filter: default_filter(),
        }
    }
}

/// Per-category list delimiters.
///
/// Delimiters are not validated. A multi-character delimiter splits on the
/// whole string; an empty delimiter splits a value into single characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    #[serde(default = "default_delimiter")]
    include: String,
    #[serde(default = "default_delimiter")]
    append: String,
    #[serde(default = "default_delimiter")]
    fields: String,
    #[serde(default = "default_delimiter")]
    sort: String,
    #[serde(default = "default_delimiter")]
    filter: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            include: default_delimiter(),
            append: default_delimiter(),
            fields: default_delimiter(),
            sort: default_delimiter(),
            filter: default_delimiter(),
        }
    }
}

impl Delimiters {
    /// Every category set to the same delimiter.
    #[must_use]
    pub fn uniform(delimiter: impl Into<String>) -> Self {
        let mut delimiters = Self::default();
        delimiters.set_all(delimiter);
        delimiters
    }

    #[must_use]
    pub fn include(&self) -> &str {
        &self.include
    }

    #[must_use]
    pub fn append(&self) -> &str {
        &self.append
    }

    #[must_use]
    pub fn fields(&self) -> &str {
        &self.fields
    }

    #[must_use]
    pub fn sort(&self) -> &str {
        &self.sort
    }

    #[must_use]
    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_include(&mut self, delimiter: impl Into<String>) {
        self.include = delimiter.into();
    }

    pub fn set_append(&mut self, delimiter: impl Into<String>) {
        self.append = delimiter.into();
    }

    pub fn set_fields(&mut self, delimiter: impl Into<String>) {
        self.fields = delimiter.into();
    }

    pub fn set_sort(&mut self, delimiter: impl Into<String>) {
        self.sort = delimiter.into();
    }

    pub fn set_filter(&mut self, delimiter: impl Into<String>) {
        self.filter = delimiter.into();
    }

    /// Assign one delimiter to all five categories.
    pub fn set_all(&mut self, delimiter: impl Into<String>) {
        let delimiter = delimiter.into();
        self.include.clone_from(&delimiter);
        self.append.clone_from(&delimiter);
        self.fields.clone_from(&delimiter);
        self.sort.clone_from(&delimiter);
        self.filter = delimiter;
    }

    /// Restore every category to [`DEFAULT_DELIMITER`].
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Everything the decoders need besides the request data itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub parameters: ParameterNames,
    #[serde(default)]
    pub delimiters: Delimiters,
    /// Nesting cap shared by parsing and filter coercion.
    ///
    /// Parsing counts bracket levels below the parameter name:
    /// `filter[a][b]=x` is two levels deep. Coercion counts container levels
    /// from each filter value, which is itself depth 0: with
    /// `filter[tags][]=a`, the `tags` list sits at depth 0 and is coerced
    /// whenever `max_depth` is at least 1. Anything past the cap passes
    /// through undecoded.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            parameters: ParameterNames::default(),
            delimiters: Delimiters::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl QueryConfig {
    #[must_use]
    pub fn with_parameters(mut self, parameters: ParameterNames) -> Self {
        self.parameters = parameters;
        self
    }

    #[must_use]
    pub fn with_delimiters(mut self, delimiters: Delimiters) -> Self {
        self.delimiters = delimiters;
        self
    }

    /// Use the same delimiter for every category.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiters.set_all(delimiter);
        self
    }

    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all(delimiters: &Delimiters) -> [&str; 5] {
        [
            delimiters.include(),
            delimiters.append(),
            delimiters.fields(),
            delimiters.sort(),
            delimiters.filter(),
        ]
    }

    #[test]
    fn test_defaults_are_commas() {
        assert_eq!(all(&Delimiters::default()), [","; 5]);
    }

    #[test]
    fn test_set_all_then_reset() {
        let mut delimiters = Delimiters::default();
        delimiters.set_all("|");
        assert_eq!(all(&delimiters), ["|"; 5]);

        delimiters.reset();
        assert_eq!(all(&delimiters), [","; 5]);
    }

    #[test]
    fn test_setters_are_independent() {
        let mut delimiters = Delimiters::default();
        delimiters.set_sort(";");
        delimiters.set_filter("::");

        assert_eq!(all(&delimiters), [",", ",", ",", ";", "::"]);
    }

    #[test]
    fn test_empty_delimiter_is_accepted() {
        let delimiters = Delimiters::uniform("");
        assert_eq!(delimiters.include(), "");
    }

    #[test]
    fn test_default_parameter_names() {
        let names = ParameterNames::default();
        assert_eq!(names.include, "include");
        assert_eq!(names.append, "append");
        assert_eq!(names.fields, "fields");
        assert_eq!(names.sort, "sort");
        assert_eq!(names.filter, "filter");
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: QueryConfig = serde_json::from_str(
            r#"{"parameters": {"filter": "where"}, "delimiters": {"sort": ";"}}"#,
        )
        .unwrap();

        assert_eq!(config.parameters.filter, "where");
        assert_eq!(config.parameters.sort, "sort");
        assert_eq!(config.delimiters.sort(), ";");
        assert_eq!(config.delimiters.include(), ",");
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config: QueryConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, QueryConfig::default());
    }
}
