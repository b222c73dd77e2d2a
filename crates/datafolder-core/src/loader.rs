//! Folder discovery and load-time errors.
//!
//! Every regular file directly inside the data folder whose extension is a
//! supported [`DataFormat`] becomes one table named after the file stem.
//! Files are visited in file-name order so that discovery (and therefore
//! which file wins a name clash) is deterministic.
//!
//! Any failure here is fatal to startup; nothing is retried.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use arrow::error::ArrowError;
use log::debug;
use parquet::errors::ParquetError;
use snafu::prelude::*;

use crate::{
    formats::DataFormat,
    table::{Table, TableError},
};

/// Errors raised while discovering or decoding data files.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum LoadError {
    /// Listing the data folder failed.
    #[snafu(display("Cannot read folder {path}: {source}"))]
    ReadDir {
        /// Folder being listed.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Opening or rewinding a data file failed.
    #[snafu(display("Cannot read file {path}: {source}"))]
    ReadFile {
        /// File being read.
        path: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file extension is not one of the supported formats.
    #[snafu(display("Unsupported file type: {path}"))]
    UnsupportedFormat {
        /// Offending file.
        path: String,
    },

    /// The file is not valid JSON.
    #[snafu(display("Invalid JSON in {path}: {source}"))]
    Json {
        /// File being decoded.
        path: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The JSON document is neither an array of records nor a single record.
    #[snafu(display("Expected a JSON array or object in {path}, found {found}"))]
    JsonShape {
        /// File being decoded.
        path: String,
        /// Kind of the top-level JSON value.
        found: &'static str,
    },

    /// Arrow failed to infer a schema or decode records.
    #[snafu(display("Failed to decode {path}: {source}"))]
    Arrow {
        /// File being decoded.
        path: String,
        /// Underlying Arrow error.
        source: ArrowError,
    },

    /// The Parquet reader rejected the file.
    #[snafu(display("Failed to read parquet file {path}: {source}"))]
    Parquet {
        /// File being decoded.
        path: String,
        /// Underlying Parquet error.
        source: ParquetError,
    },

    /// Decoded batches could not be turned into a table.
    #[snafu(display("Invalid table in {path}: {source}"))]
    Table {
        /// File being decoded.
        path: String,
        /// Underlying table error.
        source: TableError,
    },
}

impl LoadError {
    /// True if the failure is an operating-system permission error.
    pub fn is_permission_denied(&self) -> bool {
        match self {
            LoadError::ReadDir { source, .. } | LoadError::ReadFile { source, .. } => {
                source.kind() == io::ErrorKind::PermissionDenied
            }
            _ => false,
        }
    }
}

/// Convenience alias for load results.
pub type LoadResult<T> = Result<T, LoadError>;

/// Table name for a data file: its stem.
pub fn table_name(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// Decode a single data file into a table named after its stem.
pub fn load_file(path: &Path) -> LoadResult<Table> {
    let display = path.display().to_string();
    let format = DataFormat::from_path(path).context(UnsupportedFormatSnafu {
        path: display.as_str(),
    })?;
    let name = table_name(path).context(UnsupportedFormatSnafu { path: display })?;

    debug!("reading {} as {}", path.display(), format);
    format.read(path, &name)
}

/// List the supported data files directly inside `folder`, sorted by name.
pub fn discover(folder: &Path) -> LoadResult<Vec<PathBuf>> {
    let context = || ReadDirSnafu {
        path: folder.display().to_string(),
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(folder).with_context(|_| context())? {
        let path = entry.with_context(|_| context())?.path();
        if path.is_file() && DataFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every data file in `folder`, in file-name order.
pub fn load_folder(folder: &Path) -> LoadResult<Vec<Table>> {
    discover(folder)?
        .iter()
        .map(|path| load_file(path))
        .collect()
}
