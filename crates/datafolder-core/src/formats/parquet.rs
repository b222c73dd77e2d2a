//! Parquet files. Column storage types come straight from the file schema.

use std::{fs::File, path::Path};

use arrow::{array::RecordBatch, error::ArrowError};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use snafu::prelude::*;

use crate::{
    formats::BATCH_SIZE,
    loader::{ArrowSnafu, LoadResult, ParquetSnafu, ReadFileSnafu, TableSnafu},
    table::Table,
};

pub(crate) fn read(path: &Path, name: &str) -> LoadResult<Table> {
    let display = path.display().to_string();

    let file = File::open(path).context(ReadFileSnafu {
        path: display.as_str(),
    })?;

    let builder = ParquetRecordBatchReaderBuilder::try_new(file).context(ParquetSnafu {
        path: display.as_str(),
    })?;
    let schema = builder.schema().clone();

    let reader = builder
        .with_batch_size(BATCH_SIZE)
        .build()
        .context(ParquetSnafu {
            path: display.as_str(),
        })?;

    let batches = reader
        .collect::<Result<Vec<RecordBatch>, ArrowError>>()
        .context(ArrowSnafu {
            path: display.as_str(),
        })?;

    Table::from_record_batches(name, &schema, &batches).context(TableSnafu { path: display })
}
