//! Error types for query operations.
//!
//! Only two situations are errors. Everything else a request can get wrong
//! (unknown filter columns, uncoercible filter values, unknown sort columns,
//! out-of-range pagination) degrades to a smaller or unsorted result instead.

use snafu::prelude::*;

/// Errors returned by [`get_by_id`](super::get_by_id).
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QueryError {
    /// The table has no column that could serve as an id.
    #[snafu(display("no id column found"))]
    NoIdColumn {
        /// Table that was queried.
        table: String,
    },

    /// No row carries the requested id.
    #[snafu(display("row not found"))]
    RowNotFound {
        /// Table that was queried.
        table: String,
        /// Id text as received.
        id: String,
    },
}

/// Transport-neutral classification of a [`QueryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// The request cannot be answered for structural reasons.
    BadRequest,
    /// The request is valid but targets a row that does not exist.
    NotFound,
}

impl QueryError {
    /// Classify this error.
    pub fn kind(&self) -> QueryErrorKind {
        match self {
            QueryError::NoIdColumn { .. } => QueryErrorKind::BadRequest,
            QueryError::RowNotFound { .. } => QueryErrorKind::NotFound,
        }
    }
}

/// Convenience alias for query results.
pub type QueryResult<T> = Result<T, QueryError>;
