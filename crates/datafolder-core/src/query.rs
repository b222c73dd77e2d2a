//! Query engine over a single in-memory table.
//!
//! Four read-only operations:
//!
//! - [`list`]: equality filters (AND), optional single-key stable sort, then
//!   offset/limit.
//! - [`get_by_id`]: first row whose id column matches the id text.
//! - [`sample`]: uniform random subset without replacement.
//! - [`schema`]: the cached inferred schema.
//!
//! Results borrow rows from the table; nothing is copied until rendering.

mod error;
mod spec;

#[cfg(test)]
mod tests;

use std::cmp::Ordering;

use log::debug;
use rand::Rng;
use snafu::prelude::*;

pub use error::{QueryError, QueryErrorKind, QueryResult};
pub use spec::{
    DEFAULT_LIMIT, DEFAULT_SAMPLE_SIZE, Filter, LIMIT_PARAM, OFFSET_PARAM, QuerySpec,
    SAMPLE_SIZE_PARAM, SORT_PARAM, SortSpec, parse_sample_size,
};

use crate::{
    catalog::Resource,
    schema::TableSchema,
    table::{Row, Table},
    value::{Value, parse_int, try_coerce},
};
use error::{NoIdColumnSnafu, RowNotFoundSnafu};

/// Name of the preferred id column.
pub const ID_COLUMN: &str = "id";

/// A filter resolved against a table: column position plus typed value.
struct Predicate {
    idx: usize,
    target: Value,
}

impl Predicate {
    fn matches(&self, row: &Row) -> bool {
        row.get(self.idx) == Some(&self.target)
    }
}

fn resolve_filters(table: &Table, schema: &TableSchema, filters: &[Filter]) -> Vec<Predicate> {
    filters
        .iter()
        .filter_map(|f| {
            let ty = schema.get(&f.column)?;
            let idx = table.column_index(&f.column)?;
            // Uncoercible text stays text, which no typed cell equals.
            let target =
                try_coerce(&f.value, ty).unwrap_or_else(|| Value::String(f.value.clone()));
            Some(Predicate { idx, target })
        })
        .collect()
}

fn is_missing(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Float(f) => f.is_nan(),
        _ => false,
    }
}

fn sort_rows(table: &Table, rows: &mut [&Row], sort: &SortSpec) {
    let Some(idx) = table.column_index(&sort.column) else {
        return;
    };

    // slice::sort_by is stable; missing values go last in both directions.
    rows.sort_by(|a, b| {
        let va = a.get(idx).unwrap_or(&Value::Null);
        let vb = b.get(idx).unwrap_or(&Value::Null);
        match (is_missing(va), is_missing(vb)) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = va.sort_cmp(vb);
                if sort.descending { ord.reverse() } else { ord }
            }
        }
    });
}

/// Filter, sort and page the rows of `table`.
///
/// Filters on columns absent from `schema` are ignored. A sort on a column
/// the table lacks is a no-op. Offsets past the end yield an empty result.
pub fn list<'t>(table: &'t Table, schema: &TableSchema, spec: &QuerySpec) -> Vec<&'t Row> {
    let predicates = resolve_filters(table, schema, &spec.filters);

    let mut rows: Vec<&Row> = table
        .rows()
        .iter()
        .filter(|row| predicates.iter().all(|p| p.matches(row)))
        .collect();
    let matched = rows.len();

    if let Some(sort) = &spec.sort {
        sort_rows(table, &mut rows, sort);
    }

    let page: Vec<&Row> = rows
        .into_iter()
        .skip(spec.offset)
        .take(spec.limit)
        .collect();

    debug!(
        "list {}: {} of {} rows matched, returning {}",
        table.name(),
        matched,
        table.len(),
        page.len()
    );
    page
}

/// Position of the id column: `id` if present, else the first column.
pub fn id_column(table: &Table) -> Option<usize> {
    table
        .column_index(ID_COLUMN)
        .or_else(|| (!table.columns().is_empty()).then_some(0))
}

/// Look up the first row whose id column equals `id`.
///
/// `id` is tried as an integer first and as exact text otherwise, so string
/// ids that parse as integers (`"007"`) are compared numerically and do not
/// match their text form.
pub fn get_by_id<'t>(table: &'t Table, id: &str) -> QueryResult<&'t Row> {
    let idx = id_column(table).context(NoIdColumnSnafu {
        table: table.name(),
    })?;

    let key = parse_int(id).map_or_else(|| Value::String(id.to_string()), Value::Int);

    table
        .rows()
        .iter()
        .find(|row| row.get(idx).is_some_and(|cell| cell.lookup_eq(&key)))
        .context(RowNotFoundSnafu {
            table: table.name(),
            id,
        })
}

/// Draw `min(n, len)` distinct rows uniformly at random; `n <= 0` yields none.
///
/// Order of the result is unspecified.
pub fn sample<'t, R>(table: &'t Table, n: i64, rng: &mut R) -> Vec<&'t Row>
where
    R: Rng + ?Sized,
{
    if n <= 0 {
        return Vec::new();
    }
    let amount = usize::try_from(n).unwrap_or(usize::MAX).min(table.len());

    rand::seq::index::sample(rng, table.len(), amount)
        .into_iter()
        .filter_map(|i| table.rows().get(i))
        .collect()
}

/// The cached schema of a resource.
pub fn schema(resource: &Resource) -> &TableSchema {
    resource.schema()
}
