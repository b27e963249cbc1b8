//! Error types for the grid engine.
//!
//! Only dataset loading and caller mistakes are errors. A wrong guess or an
//! unknown country name is a [`GuessOutcome`](crate::session::GuessOutcome),
//! not an error.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to read country data from {path}")]
    DatasetLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse country data: {0}")]
    DatasetParse(#[from] serde_json::Error),

    #[error("failed to write country data to {path}")]
    DatasetWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("country data must be a JSON array of records")]
    NotAnArray,

    #[error("cell ({row}, {col}) is outside the {size}x{size} grid")]
    CellOutOfBounds { row: usize, col: usize, size: usize },

    #[error("catalog has {kinds} distinct kinds, need at least {needed} to fill a group")]
    CatalogTooSmall { kinds: usize, needed: usize },
}

impl GridError {
    pub fn load(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DatasetLoad {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DatasetWrite {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
