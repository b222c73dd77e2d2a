//! Core engine for serving a folder of data files as read-only tables.
//!
//! This crate provides the pieces behind the `datafolder` server:
//!
//! - A small runtime value model (`Int | Float | Bool | String | Null`) with
//!   explicit text coercion (`value` module).
//! - Immutable in-memory tables decoded from Arrow record batches (`table`
//!   module) and the JSON / CSV / Parquet readers that produce them
//!   (`formats` and `loader` modules).
//! - Schema inference from each column's storage type (`schema` module).
//! - The query engine: equality filters, single-key stable sort,
//!   offset/limit pagination, id lookup and random sampling (`query` module).
//! - The catalog built once at startup and the read-only views rendered from
//!   it (`catalog` and `discovery` modules).
//!
//! Transport crates (for example, the axum server) depend on this crate and
//! never touch Arrow or the file formats directly.
#![deny(missing_docs)]
pub mod catalog;
pub mod discovery;
pub mod formats;
pub mod loader;
pub mod query;
pub mod schema;
pub mod table;
pub mod value;

pub use catalog::{Catalog, Resource};
pub use loader::{LoadError, LoadResult};
pub use query::{QueryError, QuerySpec, SortSpec};
pub use schema::{ColumnType, TableSchema};
pub use table::{Column, Row, Table};
pub use value::Value;
