//! Route table.
//!
//! ```text
//! /                      catalog listing
//! /_schema               every table's schema
//! /_help                 plain-text help
//! /{resource}            list rows (filters, _sort, _limit, _offset)
//! /{resource}/_schema    one table's schema
//! /{resource}/_sample    random rows (n)
//! /{resource}/{id}       one row by id
//! ```
//!
//! Static segments win over `{resource}` / `{id}`, so tables named
//! `_schema` or `_help` and rows with id `_schema` or `_sample` are not
//! addressable.

use std::sync::Arc;

use axum::{Router, routing::get};
use datafolder_core::Catalog;

use crate::handlers;

/// Shared, read-only handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
}

impl AppState {
    /// Wrap a loaded catalog.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// The catalog every request reads from.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

/// Build the router serving `state`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list_resources))
        .route("/_schema", get(handlers::all_schemas))
        .route("/_help", get(handlers::help))
        .route("/{resource}", get(handlers::list_rows))
        .route("/{resource}/_schema", get(handlers::resource_schema))
        .route("/{resource}/_sample", get(handlers::sample_rows))
        .route("/{resource}/{id}", get(handlers::get_row))
        .fallback(handlers::not_found)
        .with_state(state)
}
