//! Regression result types.

use serde::{Deserialize, Serialize};

/// A single estimated coefficient with robust inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Coefficient name (`intercept`, a factor name, or `is_target_phase`).
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: f64,
    /// Estimate divided by standard error.
    pub t_statistic: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// Outcome of fitting one factor regression.
///
/// The coefficient names and their order are fixed by the model specification,
/// so results from different samples line up position by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Coefficients in design-matrix order.
    pub coefficients: Vec<Coefficient>,
    /// Number of observations used.
    pub n_observations: usize,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// R-squared adjusted for the number of regressors.
    pub adj_r_squared: f64,
    /// Residual standard deviation.
    pub residual_std: f64,
}

impl RegressionResult {
    /// Look up a coefficient by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Coefficient> {
        self.coefficients.iter().find(|c| c.name == name)
    }

    /// Point estimate of a coefficient.
    #[must_use]
    pub fn estimate(&self, name: &str) -> Option<f64> {
        self.get(name).map(|c| c.estimate)
    }

    /// Coefficient names in order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.coefficients.iter().map(|c| c.name.as_str()).collect()
    }

    /// Number of coefficients.
    #[must_use]
    pub const fn n_coefficients(&self) -> usize {
        self.coefficients.len()
    }
}
