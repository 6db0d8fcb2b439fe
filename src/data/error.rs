use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a dataset from the source file.  Fatal for that load.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed dataset: {0}")]
    Malformed(String),
    #[error("dataset has no columns")]
    NoColumns,
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// A filter references a column the dataset does not have.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid filter column '{column}': {reason}")]
pub struct InvalidColumnError {
    pub column: String,
    pub reason: &'static str,
}

impl InvalidColumnError {
    pub fn unknown(column: &str) -> Self {
        InvalidColumnError {
            column: column.to_string(),
            reason: "not a known column",
        }
    }

    pub fn absent(column: &str) -> Self {
        InvalidColumnError {
            column: column.to_string(),
            reason: "not present in the loaded dataset",
        }
    }
}
