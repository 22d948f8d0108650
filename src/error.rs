use thiserror::Error;

/// Failures at the edges of the report tool: reading inputs and writing outputs.
///
/// The aggregation functions themselves are total and never produce one of these.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid reference date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid comparison year '{0}', expected none, prev or a year")]
    InvalidComparisonYear(String),
}

pub type Result<T> = std::result::Result<T, ReportError>;
