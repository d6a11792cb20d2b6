//! Newey-West HAC (Heteroskedasticity and Autocorrelation Consistent) covariance
//! of OLS coefficients.
//!
//! The estimator is the sandwich `B S B` with `B = (X'X)^-1` and
//! ```text
//! S = Γ_0 + Σ_{l=1}^{L} w_l * (Γ_l + Γ_l^T)
//! where:
//! - g_t = x_t * u_t            (score of observation t)
//! - Γ_l = Σ_{t=l}^{T-1} g_t g_{t-l}^T
//! - w_l = 1 - l/(L+1)          (Bartlett kernel weights)
//! ```
//! Γ terms are sums, not averages, so `B S B` is already on the coefficient scale.
//!
//! # References
//! - Newey, W. K., & West, K. D. (1987). "A Simple, Positive Semi-Definite,
//!   Heteroskedasticity and Autocorrelation Consistent Covariance Matrix."
//!   Econometrica, 55(3), 703-708.

use ndarray::{Array1, Array2, Axis, s};

use crate::MathError;

/// Bartlett kernel weight for a lag.
///
/// Formula: w_l = 1 - l/(L+1) for l <= L, zero beyond.
#[must_use]
pub fn bartlett_weight(lag: usize, max_lag: usize) -> f64 {
    if lag == 0 {
        1.0
    } else if lag <= max_lag {
        1.0 - (lag as f64) / (max_lag as f64 + 1.0)
    } else {
        0.0
    }
}

/// Compute the HAC "meat" matrix `S` of OLS scores.
///
/// # Arguments
/// * `design` - Design matrix (n x k)
/// * `residuals` - OLS residuals (n,)
/// * `max_lag` - Bartlett truncation lag `L`; zero gives White's estimator
///
/// # Errors
/// Returns error if dimensions mismatch or the design is empty.
pub fn newey_west_meat(
    design: &Array2<f64>,
    residuals: &Array1<f64>,
    max_lag: usize,
) -> Result<Array2<f64>, MathError> {
    let (n, _) = design.dim();
    if residuals.len() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: residuals.len() });
    }
    if n == 0 {
        return Err(MathError::EmptyData);
    }

    let scores = design * &residuals.view().insert_axis(Axis(1));
    let mut meat = scores.t().dot(&scores);

    for lag in 1..=max_lag.min(n - 1) {
        let gamma = scores.slice(s![lag.., ..]).t().dot(&scores.slice(s![..n - lag, ..]));
        let weight = bartlett_weight(lag, max_lag);
        meat = meat + (&gamma + &gamma.t()) * weight;
    }

    Ok(meat)
}

/// Sandwich covariance `bread * meat * bread^T`.
///
/// # Errors
/// Returns error if the matrices are not conformable.
pub fn sandwich(bread: &Array2<f64>, meat: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    if bread.ncols() != meat.nrows() {
        return Err(MathError::DimensionMismatch { expected: bread.ncols(), actual: meat.nrows() });
    }
    if meat.ncols() != bread.ncols() {
        return Err(MathError::DimensionMismatch { expected: bread.ncols(), actual: meat.ncols() });
    }
    Ok(bread.dot(meat).dot(&bread.t()))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, 1, 1.0)]
    #[case(1, 1, 0.5)]
    #[case(1, 3, 0.75)]
    #[case(3, 3, 0.25)]
    #[case(4, 3, 0.0)]
    fn bartlett_weights(#[case] lag: usize, #[case] max_lag: usize, #[case] expected: f64) {
        assert_relative_eq!(bartlett_weight(lag, max_lag), expected);
    }

    #[test]
    fn zero_lag_meat_is_white() {
        let x = array![[1.0, 0.5], [1.0, -1.0], [1.0, 2.0]];
        let u = array![0.1, -0.2, 0.1];
        let meat = newey_west_meat(&x, &u, 0).unwrap();

        // Σ u_t² x_t x_t'
        let mut expected = Array2::<f64>::zeros((2, 2));
        for t in 0..3 {
            let row = x.row(t);
            for i in 0..2 {
                for j in 0..2 {
                    expected[[i, j]] += u[t] * u[t] * row[i] * row[j];
                }
            }
        }
        for (a, b) in meat.iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-15);
        }
    }

    #[test]
    fn intercept_only_meat_matches_long_run_variance() {
        // With a constant design, S reduces to the Bartlett long-run sum of u.
        let x = Array2::<f64>::ones((4, 1));
        let u = array![1.0, -1.0, 2.0, 0.5];
        let meat = newey_west_meat(&x, &u, 1).unwrap();

        let gamma0 = 1.0 + 1.0 + 4.0 + 0.25;
        let gamma1 = -1.0 + -2.0 + 1.0;
        assert_relative_eq!(meat[[0, 0]], gamma0 + 2.0 * 0.5 * gamma1, epsilon = 1e-12);
    }

    #[test]
    fn meat_is_symmetric() {
        let x = array![[1.0, 0.3, -0.1], [1.0, -0.4, 0.2], [1.0, 0.8, 0.0], [1.0, 0.1, 0.5]];
        let u = array![0.02, -0.01, 0.03, -0.04];
        let meat = newey_west_meat(&x, &u, 2).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_relative_eq!(meat[[i, j]], meat[[j, i]], epsilon = 1e-15);
            }
        }
    }

    #[test]
    fn lag_longer_than_sample_is_truncated() {
        let x = Array2::<f64>::ones((2, 1));
        let u = array![1.0, 1.0];
        let meat = newey_west_meat(&x, &u, 10).unwrap();
        // Γ_0 = 2, Γ_1 = 1, w_1 = 1 - 1/11
        assert_relative_eq!(meat[[0, 0]], 2.0 + 2.0 * (10.0 / 11.0), epsilon = 1e-12);
    }

    #[test]
    fn sandwich_dimensions() {
        let bread = array![[2.0, 0.0], [0.0, 0.5]];
        let meat = array![[1.0, 0.2], [0.2, 4.0]];
        let cov = sandwich(&bread, &meat).unwrap();
        assert_relative_eq!(cov[[0, 0]], 4.0);
        assert_relative_eq!(cov[[1, 1]], 1.0);
        assert_relative_eq!(cov[[0, 1]], 0.2);

        let wrong = Array2::<f64>::zeros((3, 3));
        assert!(sandwich(&bread, &wrong).is_err());
    }

    #[test]
    fn residual_length_mismatch() {
        let x = Array2::<f64>::ones((3, 1));
        let u = array![1.0, 2.0];
        assert!(matches!(
            newey_west_meat(&x, &u, 1),
            Err(MathError::DimensionMismatch { expected: 3, actual: 2 })
        ));
    }
}
