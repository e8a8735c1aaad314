//! Dataset preparation error types

use std::path::PathBuf;

use thiserror::Error;

/// Data preparation errors. Every variant is fatal at startup.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset archive not found: {}", .0.display())]
    ArchiveNotFound(PathBuf),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Archive contains no .csv data file")]
    NoDataFile,

    #[error("Archive contains {} .csv data files, expected exactly one: {}", .0.len(), .0.join(", "))]
    AmbiguousDataFiles(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Data file is not valid {encoding}: {reason}")]
    Decode {
        encoding: &'static str,
        reason: String,
    },

    #[error("Character {character:?} cannot be encoded as {encoding}")]
    Encode {
        encoding: &'static str,
        character: char,
    },

    #[error("Data file is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Failed to parse record {record}: {source}")]
    Parse {
        record: u64,
        #[source]
        source: csv::Error,
    },

    #[error("Unknown text encoding: {0} (expected 'latin1' or 'utf8')")]
    UnknownEncoding(String),
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        let record = err
            .position()
            .map_or(0, |p| p.record());
        Self::Parse {
            record,
            source: err,
        }
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;
