//! Linear algebra operations for factor regression.

use ndarray::{Array1, Array2, Axis};

use crate::MathError;

/// Relative pivot size below which a column is treated as linearly dependent.
const SINGULAR_TOLERANCE: f64 = 1e-10;

/// Result of an ordinary least squares fit.
#[derive(Debug, Clone)]
pub struct OlsFit {
    /// Estimated coefficients.
    pub coefficients: Array1<f64>,
    /// Residuals.
    pub residuals: Array1<f64>,
    /// `(X'X)^-1`, the bread of any sandwich covariance.
    pub xtx_inv: Array2<f64>,
    /// Sum of squared residuals.
    pub ssr: f64,
    /// Centered R-squared.
    pub r_squared: f64,
}

/// Perform ordinary least squares regression.
///
/// Solves: argmin_beta sum((y_i - X_i * beta)^2) through the normal equations.
///
/// # Arguments
/// * `y` - Response vector (n,)
/// * `x` - Design matrix (n x p)
///
/// # Returns
/// OLS fit with coefficients, residuals and `(X'X)^-1`.
///
/// # Errors
/// Returns [`MathError::Singular`] naming the first column that is linearly
/// dependent on the columns before it, or a dimension error.
pub fn ordinary_least_squares(y: &Array1<f64>, x: &Array2<f64>) -> Result<OlsFit, MathError> {
    let n = y.len();

    if x.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: x.nrows() });
    }
    if n == 0 || x.ncols() == 0 {
        return Err(MathError::EmptyData);
    }

    let xtx = x.t().dot(x);
    let xty = x.t().dot(y);

    let coefficients = solve_linear_system(&xtx, &xty)?;
    let xtx_inv = invert(&xtx)?;

    let fitted = x.dot(&coefficients);
    let residuals = y - &fitted;

    let y_mean = y.mean().unwrap_or(0.0);
    let ss_tot: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();
    let ssr: f64 = residuals.iter().map(|r| r.powi(2)).sum();
    let r_squared = if ss_tot > 0.0 { 1.0 - ssr / ss_tot } else { 0.0 };

    Ok(OlsFit { coefficients, residuals, xtx_inv, ssr, r_squared })
}

/// Solve a linear system Ax = b.
///
/// # Errors
/// Returns [`MathError::Singular`] if `a` is singular or nearly singular.
pub fn solve_linear_system(a: &Array2<f64>, b: &Array1<f64>) -> Result<Array1<f64>, MathError> {
    let rhs = b.view().insert_axis(Axis(1)).to_owned();
    let solution = eliminate(a, &rhs)?;
    Ok(solution.column(0).to_owned())
}

/// Invert a square matrix.
///
/// # Errors
/// Returns [`MathError::Singular`] if `a` is singular or nearly singular.
pub fn invert(a: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    eliminate(a, &Array2::eye(a.nrows()))
}

/// Solve AX = B using Gaussian elimination with partial pivoting.
///
/// Columns are never permuted, so a vanishing pivot in column `j` means
/// column `j` of `a` is dependent on columns `0..j`.
fn eliminate(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, MathError> {
    let n = a.nrows();
    if n == 0 {
        return Err(MathError::EmptyData);
    }
    if a.ncols() != n {
        return Err(MathError::LinearAlgebra("matrix must be square".to_string()));
    }
    if b.nrows() != n {
        return Err(MathError::DimensionMismatch { expected: n, actual: b.nrows() });
    }
    if a.iter().chain(b.iter()).any(|v| !v.is_finite()) {
        return Err(MathError::NumericalInstability("non-finite matrix entry".to_string()));
    }

    let m = b.ncols();
    let scales: Vec<f64> =
        a.columns().into_iter().map(|c| c.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))).collect();

    // Augmented matrix [A | B]
    let mut aug = Array2::zeros((n, n + m));
    aug.slice_mut(ndarray::s![.., ..n]).assign(a);
    aug.slice_mut(ndarray::s![.., n..]).assign(b);

    for col in 0..n {
        // Find pivot
        let mut max_row = col;
        let mut max_val = aug[[col, col]].abs();
        for row in (col + 1)..n {
            if aug[[row, col]].abs() > max_val {
                max_val = aug[[row, col]].abs();
                max_row = row;
            }
        }

        if max_val == 0.0 || max_val <= scales[col] * SINGULAR_TOLERANCE {
            return Err(MathError::Singular { column: col });
        }

        if max_row != col {
            for j in 0..(n + m) {
                aug.swap([col, j], [max_row, j]);
            }
        }

        // Eliminate column
        for row in (col + 1)..n {
            let factor = aug[[row, col]] / aug[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for j in col..(n + m) {
                aug[[row, j]] -= factor * aug[[col, j]];
            }
        }
    }

    // Back substitution, one right-hand side at a time
    let mut x = Array2::zeros((n, m));
    for k in 0..m {
        for i in (0..n).rev() {
            let mut sum = aug[[i, n + k]];
            for j in (i + 1)..n {
                sum -= aug[[i, j]] * x[[j, k]];
            }
            x[[i, k]] = sum / aug[[i, i]];
        }
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn ols_simple_regression() {
        let y = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let x =
            Array2::from_shape_vec((5, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0])
                .unwrap();

        let result = ordinary_least_squares(&y, &x).unwrap();

        // Perfect fit: y = 0 + 1*x
        assert_relative_eq!(result.coefficients[0], 0.0, epsilon = 1e-10);
        assert_relative_eq!(result.coefficients[1], 1.0, epsilon = 1e-10);
        assert_relative_eq!(result.r_squared, 1.0, epsilon = 1e-10);
        assert!(result.ssr < 1e-20);
    }

    #[test]
    fn ols_with_noise() {
        let y = array![1.1, 1.9, 3.2, 3.8, 5.0];
        let x =
            Array2::from_shape_vec((5, 2), vec![1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0])
                .unwrap();

        let result = ordinary_least_squares(&y, &x).unwrap();

        // Closed form simple regression: slope = Sxy / Sxx = 9.7 / 10
        assert_relative_eq!(result.coefficients[1], 0.97, epsilon = 1e-12);
        assert_relative_eq!(result.coefficients[0], 3.0 - 0.97 * 3.0, epsilon = 1e-12);
        assert_relative_eq!(result.residuals.sum(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn ols_detects_zero_column() {
        let y = array![0.1, 0.2, 0.3, 0.4];
        let x = Array2::from_shape_vec((4, 3), vec![
            1.0, 0.5, 0.0, //
            1.0, -0.2, 0.0, //
            1.0, 0.3, 0.0, //
            1.0, 0.1, 0.0,
        ])
        .unwrap();

        let err = ordinary_least_squares(&y, &x).unwrap_err();
        assert_eq!(err, MathError::Singular { column: 2 });
    }

    #[test]
    fn ols_detects_column_collinear_with_intercept() {
        let y = array![0.1, 0.2, 0.3, 0.4];
        let x = Array2::from_shape_vec((4, 3), vec![
            1.0, 0.5, 1.0, //
            1.0, -0.2, 1.0, //
            1.0, 0.3, 1.0, //
            1.0, 0.1, 1.0,
        ])
        .unwrap();

        let err = ordinary_least_squares(&y, &x).unwrap_err();
        assert_eq!(err, MathError::Singular { column: 2 });
    }

    #[test]
    fn ols_dimension_mismatch() {
        let y = array![1.0, 2.0];
        let x = Array2::ones((3, 1));
        assert!(matches!(
            ordinary_least_squares(&y, &x),
            Err(MathError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn invert_round_trip() {
        let a = array![[4.0, 1.0, 0.5], [1.0, 3.0, 0.2], [0.5, 0.2, 2.0]];
        let inv = invert(&a).unwrap();
        let identity = a.dot(&inv);
        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(identity[[i, j]], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn solve_requires_pivoting() {
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let b = array![2.0, 3.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert_relative_eq!(x[0], 3.0);
        assert_relative_eq!(x[1], 2.0);
    }

    #[test]
    fn solve_rejects_non_finite() {
        let a = array![[1.0, f64::NAN], [0.0, 1.0]];
        let b = array![1.0, 1.0];
        assert!(matches!(solve_linear_system(&a, &b), Err(MathError::NumericalInstability(_))));
    }
}
