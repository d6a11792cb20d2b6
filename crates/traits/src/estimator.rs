//! Regression estimation trait definitions.

use cyclealpha_primitives::{ModelSpec, Observation, RegressionResult};
use ndarray::{Array1, Array2};

/// Errors that can occur during estimation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimatorError {
    /// Dimension mismatch in input data.
    #[error("dimension mismatch for {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
        /// Context description.
        context: String,
    },

    /// Insufficient data for estimation.
    #[error("insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// The design matrix is rank deficient.
    #[error("singular design matrix: {detail}")]
    SingularDesign {
        /// Which column or condition made the design singular.
        detail: String,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Linear algebra error.
    #[error("linear algebra error: {0}")]
    LinearAlgebra(String),
}

impl EstimatorError {
    /// Returns whether this error is recoverable.
    ///
    /// Only a singular design is: it is expected for short windows that contain
    /// no target-phase days and is recorded rather than propagated.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::SingularDesign { .. })
    }
}

/// Trait for fitting a linear factor model over a fixed sample.
pub trait Regressor: Send + Sync {
    /// Configuration type for this regressor.
    type Config: Default + Clone + Send + Sync;

    /// Create a new regressor with the given configuration.
    fn with_config(config: Self::Config) -> Self;

    /// Fit the model described by `spec` to a contiguous sample.
    ///
    /// # Errors
    /// Returns [`EstimatorError::InsufficientData`] if the sample has fewer than
    /// `spec.min_observations()` rows and [`EstimatorError::SingularDesign`] if
    /// the design matrix is rank deficient.
    fn fit(
        &self,
        observations: &[Observation],
        spec: &ModelSpec,
    ) -> Result<RegressionResult, EstimatorError>;
}

/// Trait for estimating the covariance of OLS coefficients.
pub trait CovarianceEstimator: Send + Sync {
    /// Estimate the coefficient covariance matrix.
    ///
    /// # Arguments
    /// * `design` - Design matrix (n x k)
    /// * `residuals` - OLS residuals (n,)
    /// * `bread` - `(X'X)^-1` (k x k)
    ///
    /// # Errors
    /// Returns `EstimatorError` if dimensions mismatch or the estimate is not finite.
    fn covariance(
        &self,
        design: &Array2<f64>,
        residuals: &Array1<f64>,
        bread: &Array2<f64>,
    ) -> Result<Array2<f64>, EstimatorError>;

    /// Short name of the estimator, e.g. `HAC(1)`.
    fn name(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimator_error_is_recoverable() {
        let err = EstimatorError::SingularDesign { detail: "is_target_phase is constant".into() };
        assert!(err.is_recoverable());

        let err = EstimatorError::InsufficientData { required: 6, actual: 5 };
        assert!(!err.is_recoverable());
    }

    #[test]
    fn estimator_error_display() {
        let err = EstimatorError::DimensionMismatch {
            expected: 100,
            actual: 50,
            context: "residuals".to_string(),
        };
        assert_eq!(err.to_string(), "dimension mismatch for residuals: expected 100, got 50");

        let err = EstimatorError::InsufficientData { required: 6, actual: 2 };
        assert_eq!(err.to_string(), "insufficient data: need at least 6 observations, got 2");
    }
}
