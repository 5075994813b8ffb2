//! # querycrate
//!
//! Turns flat, string-keyed request parameters into typed query intent:
//! relation includes, attribute appends, sparse fieldsets, sorts and filters.
//!
//! ```rust,ignore
//! use querycrate::QueryRequest;
//!
//! let request = QueryRequest::from_query_str(
//!     "include=posts&fields=id,name&sort=-created_at&filter[status]=active,pending",
//! );
//!
//! request.includes();        // ["posts"]
//! request.fields();          // [Column("id"), Column("name")]
//! request.sort_directives(); // [created_at DESC]
//! request.filters();         // {"status": ["active", "pending"]}
//! ```
//!
//! The output is an intermediate representation only; building the actual
//! database query (and deciding which fields, sorts and filters are allowed)
//! is left to the caller.

pub mod config;
pub mod errors;
pub mod filtering;
pub mod openapi;
pub mod request;
pub mod source;
pub mod value;

pub use config::{Delimiters, ParameterNames, QueryConfig};
pub use errors::QueryError;
pub use filtering::{Column, FilterMap, FilterValue, SortDirective};
pub use request::QueryRequest;
pub use source::{ParameterBag, RequestDataSource};
pub use value::{ParameterMap, RawValue};
