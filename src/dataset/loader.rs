use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::table::Dataset;
use super::{csv_reader, json_reader, spreadsheet};

/// File formats the loader knows how to read, keyed by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Csv,
    Spreadsheet,
    Json,
    Text,
}

impl DatasetFormat {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(DatasetFormat::Csv),
            "xlsx" | "xls" => Some(DatasetFormat::Spreadsheet),
            "json" => Some(DatasetFormat::Json),
            "txt" => Some(DatasetFormat::Text),
            _ => None,
        }
    }
}

/// Errors raised while loading a dataset from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The path does not reference an existing file.
    NotFound(PathBuf),

    /// The extension is not one of the supported formats.
    UnsupportedFormat(String),

    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    Csv {
        path: PathBuf,
        source: csv::Error,
    },

    Spreadsheet {
        path: PathBuf,
        source: calamine::Error,
    },

    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Well-formed input that does not describe a table.
    InvalidShape { path: PathBuf, reason: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            LoadError::UnsupportedFormat(extension) => {
                write!(f, "Unsupported file format: {extension}")
            }
            LoadError::Io { path, source } => {
                write!(f, "Failed to read {}: {}", path.display(), source)
            }
            LoadError::Csv { path, source } => {
                write!(f, "Failed to parse CSV {}: {}", path.display(), source)
            }
            LoadError::Spreadsheet { path, source } => {
                write!(
                    f,
                    "Failed to read spreadsheet {}: {}",
                    path.display(),
                    source
                )
            }
            LoadError::Json { path, source } => {
                write!(f, "Failed to parse JSON {}: {}", path.display(), source)
            }
            LoadError::InvalidShape { path, reason } => {
                write!(f, "{} is not tabular: {}", path.display(), reason)
            }
        }
    }
}

impl StdError for LoadError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Csv { source, .. } => Some(source),
            LoadError::Spreadsheet { source, .. } => Some(source),
            LoadError::Json { source, .. } => Some(source),
            LoadError::NotFound(_)
            | LoadError::UnsupportedFormat(_)
            | LoadError::InvalidShape { .. } => None,
        }
    }
}

/// Lower-cased text after the last `.` of the file name, empty if there is none.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|extension| extension.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default()
}

/// Read `path` with the reader matching its extension.
pub fn load(path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let extension = extension_of(path);
    let format = DatasetFormat::from_extension(&extension)
        .ok_or_else(|| LoadError::UnsupportedFormat(extension.clone()))?;
    debug!(path = %path.display(), ?format, "Loading dataset");

    let dataset = match format {
        DatasetFormat::Csv => Dataset::Table(csv_reader::read_path(path)?),
        DatasetFormat::Spreadsheet => Dataset::Table(spreadsheet::read_path(path)?),
        DatasetFormat::Json => Dataset::Table(json_reader::read_path(path)?),
        DatasetFormat::Text => {
            let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            Dataset::Text(text)
        }
    };

    Ok(dataset)
}
