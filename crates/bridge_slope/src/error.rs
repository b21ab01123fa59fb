use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SlopeError>;

#[derive(Debug, Error)]
pub enum SlopeError {
    #[error("Invalid span: distance must be positive, got {distance}")]
    InvalidSpan { distance: f64 },

    #[error("Invalid parameter {name}: {value} is not a finite number")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("Singular system: anchor points must have distinct x coordinates")]
    SingularSystem,

    #[error("Unclassified pattern {pattern} at row {row}, col {col}")]
    UnclassifiedPattern {
        row: usize,
        col: usize,
        pattern: String,
    },

    #[error("Grid too large: the raster would exceed {limit} cells")]
    GridTooLarge { limit: usize },

    #[error("Invalid resolution: {0} (must be at least 1)")]
    InvalidResolution(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
