//! # Extractor Errors
//!
//! Decoding itself never fails: bad or missing parameters decode to empty
//! results. The only failures come from parsing the query string and reading
//! the request body in the [`QueryRequest`](crate::QueryRequest) extractor.
//!
//! Like every other rejection, a [`QueryError`] turns into a JSON response with
//! a sanitized message. Parser details are logged through `tracing` and never
//! sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

#[derive(Debug)]
pub enum QueryError {
    /// 400 Bad Request - the query string has conflicting parameters
    InvalidQuery {
        /// Parser error (logged, not sent to user)
        internal: String,
    },

    /// 400 Bad Request - the body could not be parsed
    InvalidBody {
        /// User-facing error message
        message: String,
        /// Parser error (logged, not sent to user)
        internal: String,
    },

    /// The body could not be read; `status` comes from the body rejection,
    /// e.g. 413 when it exceeds the length limit
    BodyRead {
        status: StatusCode,
        /// Underlying error (logged, not sent to user)
        internal: String,
    },

    /// 415 Unsupported Media Type - a body was sent in a format we cannot decode
    UnsupportedMediaType {
        content_type: Option<String>,
    },
}

impl QueryError {
    /// Create a 400 error for a JSON body that failed to parse
    pub fn invalid_json(err: &serde_json::Error) -> Self {
        Self::InvalidBody {
            message: "Request body is not valid JSON".to_string(),
            internal: err.to_string(),
        }
    }

    pub fn invalid_query(err: &serde_qs::Error) -> Self {
        Self::InvalidQuery {
            internal: err.to_string(),
        }
    }

    /// Create a 400 error for a form body with conflicting parameters
    pub fn invalid_form(err: &serde_qs::Error) -> Self {
        Self::InvalidBody {
            message: "Request body is not valid form data".to_string(),
            internal: err.to_string(),
        }
    }

    pub fn body_read(status: StatusCode, internal: impl Into<String>) -> Self {
        Self::BodyRead {
            status,
            internal: internal.into(),
        }
    }

    pub const fn unsupported_media_type(content_type: Option<String>) -> Self {
        Self::UnsupportedMediaType { content_type }
    }

    /// HTTP status code for this error
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidQuery { .. } | Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            Self::BodyRead { status, .. } => *status,
            Self::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    /// User-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidQuery { .. } => "Query string is malformed".to_string(),
            Self::InvalidBody { message, .. } => message.clone(),
            Self::BodyRead { status, .. } if *status == StatusCode::PAYLOAD_TOO_LARGE => {
                "Request body is too large".to_string()
            }
            Self::BodyRead { .. } => "Failed to read request body".to_string(),
            Self::UnsupportedMediaType {
                content_type: Some(content_type),
            } => format!("Unsupported content type '{content_type}'"),
            Self::UnsupportedMediaType { content_type: None } => {
                "Request body has no content type".to_string()
            }
        }
    }

    fn log_internal(&self) {
        match self {
            Self::InvalidQuery { internal } => {
                tracing::debug!(details = %internal, "Rejected malformed query string");
            }
            Self::InvalidBody { internal, .. } => {
                tracing::debug!(details = %internal, "Rejected unparseable request body");
            }
            Self::BodyRead { status, internal } => {
                tracing::warn!(details = %internal, status = %status, "Failed to read request body");
            }
            Self::UnsupportedMediaType { .. } => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "Query extractor rejection"
                );
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for QueryError {}
