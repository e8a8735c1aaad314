//! Generator error types

use thiserror::Error;

/// Synthetic dataset errors
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Encoding error: {0}")]
    Encoding(#[from] gtd_dataset::DatasetError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, SynthError>;
