//! CSV files with a header row.
//!
//! Column types are inferred by Arrow over every record: integers, floats,
//! booleans (`true`/`false`, any case), dates and timestamps are recognized;
//! everything else is text. Empty fields are nulls.

use std::{
    fs::File,
    io::{Seek, SeekFrom},
    path::Path,
    sync::Arc,
};

use arrow::{array::RecordBatch, error::ArrowError};
use arrow_csv::{ReaderBuilder, reader::Format};
use snafu::prelude::*;

use crate::{
    formats::BATCH_SIZE,
    loader::{ArrowSnafu, LoadResult, ReadFileSnafu, TableSnafu},
    table::Table,
};

pub(crate) fn read(path: &Path, name: &str) -> LoadResult<Table> {
    let display = path.display().to_string();

    let mut file = File::open(path).context(ReadFileSnafu {
        path: display.as_str(),
    })?;

    let format = Format::default().with_header(true);
    let (schema, _records) = format.infer_schema(&mut file, None).context(ArrowSnafu {
        path: display.as_str(),
    })?;
    let schema = Arc::new(schema);

    file.seek(SeekFrom::Start(0)).context(ReadFileSnafu {
        path: display.as_str(),
    })?;

    let reader = ReaderBuilder::new(schema.clone())
        .with_format(format)
        .with_batch_size(BATCH_SIZE)
        .build(file)
        .context(ArrowSnafu {
            path: display.as_str(),
        })?;

    let batches = reader
        .collect::<Result<Vec<RecordBatch>, ArrowError>>()
        .context(ArrowSnafu {
            path: display.as_str(),
        })?;

    Table::from_record_batches(name, &schema, &batches).context(TableSnafu { path: display })
}
