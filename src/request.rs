//! # QueryRequest
//!
//! Bundles request parameters with a [`QueryConfig`] and exposes the five
//! decoders as methods. It doubles as an Axum extractor:
//!
//! ```rust,ignore
//! use axum::{Extension, Json, Router, routing::get};
//! use querycrate::{QueryConfig, QueryRequest};
//!
//! async fn list_users(query: QueryRequest) -> Json<serde_json::Value> {
//!     let includes = query.includes();     // ?include=posts,comments
//!     let sorts = query.sort_directives(); // ?sort=-created_at
//!     let filters = query.filters();       // ?filter[status]=active
//!     // hand off to the query builder...
//! #   unimplemented!()
//! }
//!
//! let app: Router = Router::new()
//!     .route("/users", get(list_users))
//!     .layer(Extension(QueryConfig::default()));
//! ```
//!
//! The extractor merges the query string with a JSON or form body (body values
//! win) and reads its configuration from the `QueryConfig` request extension,
//! falling back to the defaults when none is registered. Conflicting query or
//! form parameters are rejected with 400, and body read failures keep their own
//! status (413 for a body over the length limit).

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};

use crate::config::QueryConfig;
use crate::errors::QueryError;
use crate::filtering::{
    Column, FilterMap, SortDirective, decode_appends, decode_fields, decode_filters, decode_includes,
    decode_sort_directives, decode_sorts,
};
use crate::source::{ParameterBag, RequestDataSource};

/// Request parameters plus the configuration used to decode them.
#[derive(Debug, Clone, Default)]
pub struct QueryRequest<S = ParameterBag> {
    source: S,
    config: QueryConfig,
}

impl QueryRequest<ParameterBag> {
    /// Parse a query string with the default configuration.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        Self::new(ParameterBag::from_query_str(query))
    }
}

impl<S: RequestDataSource> QueryRequest<S> {
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_config(source, QueryConfig::default())
    }

    #[must_use]
    pub const fn with_config(source: S, config: QueryConfig) -> Self {
        Self { source, config }
    }

    #[must_use]
    pub const fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub const fn config_mut(&mut self) -> &mut QueryConfig {
        &mut self.config
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub fn into_source(self) -> S {
        self.source
    }

    /// Relations to eager load.
    #[must_use]
    pub fn includes(&self) -> Vec<String> {
        decode_includes(
            &self.source,
            &self.config.parameters.include,
            self.config.delimiters.include(),
        )
    }

    /// Computed attributes to append.
    #[must_use]
    pub fn appends(&self) -> Vec<String> {
        decode_appends(
            &self.source,
            &self.config.parameters.append,
            self.config.delimiters.append(),
        )
    }

    /// Columns to select.
    #[must_use]
    pub fn fields(&self) -> Vec<Column> {
        decode_fields(
            &self.source,
            &self.config.parameters.fields,
            self.config.delimiters.fields(),
        )
    }

    /// Raw sort tokens, e.g. `["-name", "email"]`.
    #[must_use]
    pub fn sorts(&self) -> Vec<String> {
        decode_sorts(
            &self.source,
            &self.config.parameters.sort,
            self.config.delimiters.sort(),
        )
    }

    #[must_use]
    pub fn sort_directives(&self) -> Vec<SortDirective> {
        decode_sort_directives(
            &self.source,
            &self.config.parameters.sort,
            self.config.delimiters.sort(),
        )
    }

    /// Coerced filters keyed by filter name.
    #[must_use]
    pub fn filters(&self) -> FilterMap {
        decode_filters(
            &self.source,
            &self.config.parameters.filter,
            self.config.delimiters.filter(),
            self.config.max_depth,
        )
    }
}

/// How the request body should be decoded, judged from its content type.
enum BodyFormat {
    Json,
    Form,
    Unsupported(Option<String>),
}

fn body_format(content_type: Option<&str>) -> BodyFormat {
    let Some(content_type) = content_type else {
        return BodyFormat::Unsupported(None);
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json")) {
        BodyFormat::Json
    } else if mime == "application/x-www-form-urlencoded" {
        BodyFormat::Form
    } else {
        BodyFormat::Unsupported(Some(content_type.to_string()))
    }
}

impl<St> FromRequest<St> for QueryRequest
where
    St: Send + Sync,
{
    type Rejection = QueryError;

    async fn from_request(req: Request, state: &St) -> Result<Self, Self::Rejection> {
        let config = req
            .extensions()
            .get::<QueryConfig>()
            .cloned()
            .unwrap_or_default();

        let query_params = match req.uri().query() {
            Some(query) => ParameterBag::parse_query(query, config.max_depth)?,
            None => ParameterBag::new(),
        };

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| QueryError::body_read(rejection.status(), rejection.body_text()))?;

        if body.is_empty() {
            return Ok(Self::with_config(query_params, config));
        }

        let body_params = match body_format(content_type.as_deref()) {
            BodyFormat::Json => {
                let value: serde_json::Value =
                    serde_json::from_slice(&body).map_err(|err| QueryError::invalid_json(&err))?;
                ParameterBag::from_json(value)
            }
            BodyFormat::Form => ParameterBag::parse_form(&body, config.max_depth)?,
            BodyFormat::Unsupported(content_type) => {
                return Err(QueryError::unsupported_media_type(content_type));
            }
        };

        tracing::debug!(
            query_params = query_params.len(),
            body_params = body_params.len(),
            "Extracted query request"
        );

        Ok(Self::with_config(query_params.merge(body_params), config))
    }
}
