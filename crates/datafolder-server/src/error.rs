//! Error types for the HTTP layer.
//!
//! [`ApiError`] covers per-request failures and renders as
//! `{"detail": message}` with the matching status code. [`ServerError`]
//! covers listener failures, which are fatal.

use std::io;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use datafolder_core::query::{QueryError, QueryErrorKind};
use serde::Serialize;
use snafu::prelude::*;

/// Per-request failures.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ApiError {
    /// The `{resource}` path segment names no loaded table.
    #[snafu(display("resource not found"))]
    UnknownResource {
        /// Requested resource name.
        name: String,
    },

    /// The path matched no route.
    #[snafu(display("Not Found"))]
    UnknownRoute,

    /// The query engine rejected the request.
    #[snafu(display("{source}"))]
    Query {
        /// Underlying engine error.
        source: QueryError,
    },
}

impl ApiError {
    /// Status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownResource { .. } | ApiError::UnknownRoute => StatusCode::NOT_FOUND,
            ApiError::Query { source } => match source.kind() {
                QueryErrorKind::BadRequest => StatusCode::BAD_REQUEST,
                QueryErrorKind::NotFound => StatusCode::NOT_FOUND,
            },
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(source: QueryError) -> Self {
        ApiError::Query { source }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            detail: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Listener failures.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ServerError {
    /// Binding the listening socket failed.
    #[snafu(display("Cannot listen on {addr}: {source}"))]
    Bind {
        /// Address that was requested.
        addr: String,
        /// Port that was requested.
        port: u16,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The server loop stopped with an I/O error.
    #[snafu(display("Server error: {source}"))]
    Serve {
        /// Underlying I/O error.
        source: io::Error,
    },
}

impl ServerError {
    /// True if binding failed because the port is taken.
    pub fn is_addr_in_use(&self) -> bool {
        matches!(
            self,
            ServerError::Bind { source, .. } if source.kind() == io::ErrorKind::AddrInUse
        )
    }
}

/// Convenience alias for server results.
pub type ServerResult<T> = Result<T, ServerError>;
