//! Error types for the statistical core.

use cyclealpha_math::MathError;
use cyclealpha_primitives::FrameError;
use cyclealpha_traits::EstimatorError;

/// Errors that can occur in regression, resampling and drawdown analysis.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Estimator error (insufficient data, singular design, ...).
    #[error("estimator error: {0}")]
    Estimator(#[from] EstimatorError),

    /// Math error.
    #[error("math error: {0}")]
    Math(#[from] MathError),

    /// Frame construction error.
    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// A partition or series has no observations.
    #[error("empty partition: {0}")]
    EmptyPartition(String),

    /// Too few observations for a test.
    #[error("insufficient data for {context}: need at least {required}, got {actual}")]
    InsufficientData {
        /// What needed the data.
        context: String,
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// A statistic could not be evaluated on the data.
    #[error("degenerate statistic: {0}")]
    DegenerateStatistic(String),

    /// Invalid input values.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ModelError {
    /// Returns whether this error is recoverable.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Estimator(e) if e.is_recoverable())
    }
}
