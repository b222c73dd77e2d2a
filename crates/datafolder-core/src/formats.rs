//! Supported data file formats.
//!
//! Each format decodes a file into Arrow record batches and hands them to
//! [`Table::from_record_batches`], so column storage types always come from
//! Arrow's own type inference (JSON, CSV) or the file schema (Parquet).

mod csv;
mod json;
mod parquet;

use std::{fmt, path::Path};

use crate::{loader::LoadResult, table::Table};

/// Rows per decoded record batch.
pub(crate) const BATCH_SIZE: usize = 8192;

/// A data file format recognized by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// A JSON array of objects, or a single object (one-row table).
    Json,
    /// Comma-separated values with a header row.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl DataFormat {
    /// Every supported format.
    pub const ALL: [DataFormat; 3] = [DataFormat::Json, DataFormat::Csv, DataFormat::Parquet];

    /// File extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Csv => "csv",
            DataFormat::Parquet => "parquet",
        }
    }

    /// Detect the format from a path's extension (case-sensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        Self::ALL.into_iter().find(|f| f.extension() == ext)
    }

    /// Decode `path` into a table called `name`.
    pub fn read(self, path: &Path, name: &str) -> LoadResult<Table> {
        match self {
            DataFormat::Json => json::read(path, name),
            DataFormat::Csv => csv::read(path, name),
            DataFormat::Parquet => parquet::read(path, name),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
