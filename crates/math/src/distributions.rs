//! Reference distributions for test statistics.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

use crate::MathError;

fn standard_normal() -> Result<Normal, MathError> {
    Normal::new(0.0, 1.0).map_err(|e| MathError::InvalidParameter(e.to_string()))
}

fn students_t(df: f64) -> Result<StudentsT, MathError> {
    StudentsT::new(0.0, 1.0, df)
        .map_err(|e| MathError::InvalidParameter(format!("Student-t with {df} df: {e}")))
}

/// Standard normal cumulative distribution function.
///
/// # Errors
/// Returns `InvalidParameter` if the distribution cannot be constructed.
pub fn standard_normal_cdf(x: f64) -> Result<f64, MathError> {
    Ok(standard_normal()?.cdf(x))
}

/// Two-sided p-value of a statistic under the standard normal.
///
/// Uses the survival function so deep tails keep relative precision.
/// A NaN statistic gives a NaN p-value.
///
/// # Errors
/// Returns `InvalidParameter` if the distribution cannot be constructed.
pub fn normal_two_sided_p_value(statistic: f64) -> Result<f64, MathError> {
    let normal = standard_normal()?;
    if statistic.is_nan() {
        return Ok(f64::NAN);
    }
    if statistic.is_infinite() {
        return Ok(0.0);
    }
    Ok(2.0 * normal.sf(statistic.abs()))
}

/// Student's t cumulative distribution function.
///
/// # Errors
/// Returns `InvalidParameter` unless `df` is positive.
pub fn student_t_cdf(t: f64, df: f64) -> Result<f64, MathError> {
    Ok(students_t(df)?.cdf(t))
}

/// Two-sided p-value of a statistic under Student's t with `df` degrees of freedom.
///
/// # Errors
/// Returns `InvalidParameter` unless `df` is positive.
pub fn student_t_two_sided_p_value(statistic: f64, df: f64) -> Result<f64, MathError> {
    let dist = students_t(df)?;
    if statistic.is_nan() {
        return Ok(f64::NAN);
    }
    if statistic.is_infinite() {
        return Ok(0.0);
    }
    Ok(2.0 * dist.sf(statistic.abs()))
}
