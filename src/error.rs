use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing timestamp/kwh column. Columns: {columns:?}")]
    MissingColumns { columns: Vec<String> },

    #[error("No header row in {}", .0.display())]
    EmptyFile(PathBuf),

    #[error("Dashboard rendering error: {0}")]
    Render(String),
}

impl From<config::ConfigError> for ProcessingError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
