//! JSON files: an array of records, or a single record.
//!
//! The document is parsed with `serde_json` (key order preserved), the Arrow
//! schema is inferred over every record, and records are fed through the
//! Arrow JSON decoder. Columns holding a mix of text and scalars infer as
//! text; `with_coerce_primitive` lets the decoder accept the scalars.

use std::{fs::File, io::BufReader, path::Path, sync::Arc};

use arrow::error::ArrowError;
use arrow_json::{ReaderBuilder, reader::infer_json_schema_from_iterator};
use serde_json::Value as JsonValue;
use snafu::prelude::*;

use crate::{
    formats::BATCH_SIZE,
    loader::{ArrowSnafu, JsonShapeSnafu, JsonSnafu, LoadResult, ReadFileSnafu, TableSnafu},
    table::Table,
};

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

pub(crate) fn read(path: &Path, name: &str) -> LoadResult<Table> {
    let display = path.display().to_string();

    let file = File::open(path).context(ReadFileSnafu {
        path: display.as_str(),
    })?;
    let doc: JsonValue = serde_json::from_reader(BufReader::new(file)).context(JsonSnafu {
        path: display.as_str(),
    })?;

    let records = match doc {
        JsonValue::Array(items) => items,
        record @ JsonValue::Object(_) => vec![record],
        other => {
            return JsonShapeSnafu {
                path: display,
                found: kind(&other),
            }
            .fail();
        }
    };

    if records.is_empty() {
        return Ok(Table::empty(name));
    }

    let schema = infer_json_schema_from_iterator(records.iter().map(Ok::<_, ArrowError>))
        .context(ArrowSnafu {
            path: display.as_str(),
        })?;
    let schema = Arc::new(schema);

    let mut decoder = ReaderBuilder::new(schema.clone())
        .with_batch_size(BATCH_SIZE)
        .with_coerce_primitive(true)
        .build_decoder()
        .context(ArrowSnafu {
            path: display.as_str(),
        })?;

    let mut batches = Vec::new();
    for chunk in records.chunks(BATCH_SIZE) {
        decoder.serialize(chunk).context(ArrowSnafu {
            path: display.as_str(),
        })?;
        if let Some(batch) = decoder.flush().context(ArrowSnafu {
            path: display.as_str(),
        })? {
            batches.push(batch);
        }
    }

    Table::from_record_batches(name, &schema, &batches).context(TableSnafu { path: display })
}
