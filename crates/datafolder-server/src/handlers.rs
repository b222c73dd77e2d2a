//! Request handlers.
//!
//! Every handler looks the table up in the catalog, runs one query engine
//! operation and serializes the borrowed result before returning, so no row
//! is cloned on the way out.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use datafolder_core::{
    Catalog, QuerySpec, Resource,
    discovery::{self, RowObject, SchemaDocument},
    query::{self, SAMPLE_SIZE_PARAM, parse_sample_size},
};
use log::debug;

use crate::{
    error::{ApiError, UnknownResourceSnafu},
    router::AppState,
};

fn resource<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Resource, ApiError> {
    catalog
        .get(name)
        .ok_or_else(|| UnknownResourceSnafu { name }.build())
}

/// `GET /`
pub async fn list_resources(State(state): State<AppState>) -> Response {
    Json(discovery::resource_list(state.catalog())).into_response()
}

/// `GET /_schema`
pub async fn all_schemas(State(state): State<AppState>) -> Response {
    Json(discovery::all_schemas(state.catalog())).into_response()
}

/// `GET /_help`
pub async fn help(State(state): State<AppState>) -> String {
    discovery::help_text(state.catalog())
}

/// `GET /{resource}`
///
/// Query pairs are taken in order so that the last of a repeated key wins.
pub async fn list_rows(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let res = resource(state.catalog(), &name)?;
    let spec =
        QuerySpec::from_params(params.iter().map(|(key, value)| (key.as_str(), value.as_str())));
    debug!("list {name}: {spec:?}");

    let rows = query::list(res.table(), res.schema(), &spec);
    Ok(Json(discovery::row_objects(res.table(), rows)).into_response())
}

/// `GET /{resource}/_schema`
pub async fn resource_schema(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let res = resource(state.catalog(), &name)?;
    Ok(Json(SchemaDocument(query::schema(res))).into_response())
}

/// `GET /{resource}/_sample`
///
/// A repeated `n` is not an error: the last value wins.
pub async fn sample_rows(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let res = resource(state.catalog(), &name)?;
    let raw = params
        .iter()
        .rev()
        .find(|(key, _)| key.as_str() == SAMPLE_SIZE_PARAM)
        .map(|(_, value)| value.as_str());
    let n = parse_sample_size(raw);
    debug!("sample {name}: n={n}");

    let rows = query::sample(res.table(), n, &mut rand::thread_rng());
    Ok(Json(discovery::row_objects(res.table(), rows)).into_response())
}

/// `GET /{resource}/{id}`
pub async fn get_row(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let res = resource(state.catalog(), &name)?;
    debug!("get {name}/{id}");

    let row = query::get_by_id(res.table(), &id)?;
    Ok(Json(RowObject::new(res.table(), row)).into_response())
}

/// Fallback for unmatched paths.
pub async fn not_found() -> ApiError {
    ApiError::UnknownRoute
}
