use echeancier_traits::{ConversionError, DocumentError};
use std::path::PathBuf;
use thiserror::Error;

/// Why an export attempt was abandoned.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Conversion failed: {0}")]
    Conversion(#[from] ConversionError),

    #[error("Page numbering failed: {0}")]
    Stamping(#[source] DocumentError),

    #[error("Save failed: {0}")]
    Save(#[source] DocumentError),

    #[error("Export task failed: {0}")]
    Task(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level error of the command-line tool.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
