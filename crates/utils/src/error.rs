//! Error types for data alignment and export.

use cyclealpha_primitives::FrameError;

/// Errors that can occur while moving data between polars and cyclealpha types.
#[derive(Debug, thiserror::Error)]
pub enum UtilsError {
    /// Polars error.
    #[error("polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// The aligned rows do not form a valid frame.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// Invalid parameter.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Missing column.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A date outside the representable calendar.
    #[error("invalid date: {0} days since epoch")]
    InvalidDate(i32),
}
