//! Error types shared by the loaders, the pipeline and the writers.

use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum OdError {
    #[error("Missing input files: {}", display_paths(.0))]
    MissingFiles(Vec<PathBuf>),
    #[error("Failed to read or write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid classifier pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

impl OdError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        OdError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        OdError::Csv {
            path: path.into(),
            source,
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, OdError>;
