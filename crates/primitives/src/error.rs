//! Error types for frame construction.

use crate::Date;

/// Errors that can occur while building a [`crate::TimeSeriesFrame`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FrameError {
    /// The same date appears more than once.
    #[error("duplicate observation for date {0}")]
    DuplicateDate(Date),

    /// `cycle_phase` or `is_target_phase` disagrees with the date's year.
    #[error("cycle phase tags on {0} do not match its year")]
    PhaseMismatch(Date),

    /// A numeric field is NaN or infinite.
    #[error("non-finite {field} on {date}")]
    NonFinite {
        /// Date of the offending observation.
        date: Date,
        /// Field name.
        field: &'static str,
    },
}
