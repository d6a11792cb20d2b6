//! Coefficient covariance estimators.

use cyclealpha_math::{newey_west_meat, sandwich};
use cyclealpha_traits::{CovarianceEstimator, EstimatorError};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Which covariance estimator a regression uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CovarianceKind {
    /// Newey-West HAC with Bartlett kernel.
    Hac {
        /// Truncation lag.
        lags: usize,
        /// Scale by `n / (n - k)`.
        small_sample_correction: bool,
    },
    /// Homoskedastic `sigma^2 (X'X)^-1`.
    Classical,
}

impl Default for CovarianceKind {
    fn default() -> Self {
        Self::Hac { lags: 1, small_sample_correction: true }
    }
}

impl CovarianceKind {
    /// Estimate the coefficient covariance with the selected estimator.
    ///
    /// # Errors
    /// Propagates the estimator's error.
    pub fn covariance(
        &self,
        design: &Array2<f64>,
        residuals: &Array1<f64>,
        bread: &Array2<f64>,
    ) -> Result<Array2<f64>, EstimatorError> {
        match *self {
            Self::Hac { lags, small_sample_correction } => {
                HacCovariance::new(lags, small_sample_correction).covariance(design, residuals, bread)
            }
            Self::Classical => ClassicalCovariance.covariance(design, residuals, bread),
        }
    }

    /// Short name of the selected estimator.
    #[must_use]
    pub fn name(&self) -> String {
        match *self {
            Self::Hac { lags, small_sample_correction } => {
                HacCovariance::new(lags, small_sample_correction).name()
            }
            Self::Classical => ClassicalCovariance.name(),
        }
    }
}

/// Newey-West HAC coefficient covariance.
#[derive(Debug, Clone, Copy)]
pub struct HacCovariance {
    lags: usize,
    small_sample_correction: bool,
}

impl HacCovariance {
    /// Create a HAC estimator with the given truncation lag.
    #[must_use]
    pub const fn new(lags: usize, small_sample_correction: bool) -> Self {
        Self { lags, small_sample_correction }
    }

    /// Get the truncation lag.
    #[must_use]
    pub const fn lags(&self) -> usize {
        self.lags
    }
}

impl CovarianceEstimator for HacCovariance {
    fn covariance(
        &self,
        design: &Array2<f64>,
        residuals: &Array1<f64>,
        bread: &Array2<f64>,
    ) -> Result<Array2<f64>, EstimatorError> {
        let (n, k) = design.dim();
        let meat = newey_west_meat(design, residuals, self.lags)
            .map_err(|e| EstimatorError::LinearAlgebra(e.to_string()))?;
        let mut cov =
            sandwich(bread, &meat).map_err(|e| EstimatorError::LinearAlgebra(e.to_string()))?;

        if self.small_sample_correction {
            if n <= k {
                return Err(EstimatorError::InsufficientData { required: k + 1, actual: n });
            }
            cov *= n as f64 / (n - k) as f64;
        }

        Ok(cov)
    }

    fn name(&self) -> String {
        format!("HAC({})", self.lags)
    }
}

/// Classical homoskedastic coefficient covariance.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassicalCovariance;

impl CovarianceEstimator for ClassicalCovariance {
    fn covariance(
        &self,
        design: &Array2<f64>,
        residuals: &Array1<f64>,
        bread: &Array2<f64>,
    ) -> Result<Array2<f64>, EstimatorError> {
        let (n, k) = design.dim();
        if residuals.len() != n {
            return Err(EstimatorError::DimensionMismatch {
                expected: n,
                actual: residuals.len(),
                context: "residuals".to_string(),
            });
        }
        if n <= k {
            return Err(EstimatorError::InsufficientData { required: k + 1, actual: n });
        }

        let sigma2 = residuals.iter().map(|u| u * u).sum::<f64>() / (n - k) as f64;
        Ok(bread * sigma2)
    }

    fn name(&self) -> String {
        "nonrobust".to_string()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn default_is_hac_one_lag() {
        assert_eq!(
            CovarianceKind::default(),
            CovarianceKind::Hac { lags: 1, small_sample_correction: true }
        );
        assert_eq!(CovarianceKind::default().name(), "HAC(1)");
        assert_eq!(CovarianceKind::Classical.name(), "nonrobust");
    }

    #[test]
    fn intercept_only_hac_matches_long_run_variance_of_mean() {
        // Regressing on a constant: Var(mean) = S / n^2, S the Bartlett long-run sum.
        let u = array![1.0, -1.0, 2.0, 0.5];
        let x = Array2::<f64>::ones((4, 1));
        let bread = array![[0.25]];

        let cov = HacCovariance::new(1, false).covariance(&x, &u, &bread).unwrap();
        let s = 6.25 + 2.0 * 0.5 * -2.0;
        assert_relative_eq!(cov[[0, 0]], s / 16.0, epsilon = 1e-12);

        let corrected = HacCovariance::new(1, true).covariance(&x, &u, &bread).unwrap();
        assert_relative_eq!(corrected[[0, 0]], s / 16.0 * 4.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn classical_scales_bread() {
        let u = array![0.1, -0.1, 0.2];
        let x = Array2::<f64>::ones((3, 1));
        let bread = array![[1.0 / 3.0]];

        let cov = ClassicalCovariance.covariance(&x, &u, &bread).unwrap();
        assert_relative_eq!(cov[[0, 0]], (0.06 / 2.0) / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn classical_requires_degrees_of_freedom() {
        let u = array![0.1];
        let x = Array2::<f64>::ones((1, 1));
        let bread = array![[1.0]];
        assert!(matches!(
            ClassicalCovariance.covariance(&x, &u, &bread),
            Err(EstimatorError::InsufficientData { required: 2, actual: 1 })
        ));
    }
}
