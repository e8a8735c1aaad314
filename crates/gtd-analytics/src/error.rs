//! Analytics error types.

use thiserror::Error;

/// Analytics errors.
#[derive(Error, Debug)]
pub enum AnalyticsError {
    /// DuckDB error
    #[error("DuckDB error: {0}")]
    DuckDb(#[from] duckdb::Error),

    /// Data conversion error
    #[error("Data conversion error: {0}")]
    Conversion(String),

    /// Invalid parameter
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No data found
    #[error("No data found for query")]
    NoData,

    /// A t-test group needs at least two observations
    #[error("Hypothesis test undefined: {group} group has {size} weapon type(s), need at least 2")]
    InsufficientSample { group: &'static str, size: usize },

    /// Distribution construction or evaluation failed
    #[error("Statistics error: {0}")]
    Statistics(String),
}

/// Result type for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
