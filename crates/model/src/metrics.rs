//! Partition performance metrics and the Welch mean-difference test.

use cyclealpha_math::{mean, sample_variance, student_t_two_sided_p_value};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Summary statistics of one return partition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Partition label.
    pub name: String,
    /// Number of returns.
    pub count: usize,
    /// Arithmetic mean return.
    pub mean: f64,
    /// Sample standard deviation.
    pub volatility: f64,
    /// Annualized Sharpe-like ratio; zero when volatility is zero.
    pub sharpe: f64,
    /// Worst return.
    pub min: f64,
    /// Best return.
    pub max: f64,
    /// Fraction of strictly positive returns.
    pub win_rate: f64,
}

impl PerformanceMetrics {
    /// Compute metrics for a partition.
    ///
    /// # Errors
    /// Returns `EmptyPartition` for an empty partition.
    pub fn compute(
        name: impl Into<String>,
        returns: &[f64],
        periods_per_year: f64,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let Some(mean) = mean(returns) else {
            return Err(ModelError::EmptyPartition(name));
        };
        let count = returns.len();
        let volatility = sample_variance(returns).map_or(0.0, f64::sqrt);
        let sharpe =
            if volatility > 0.0 { mean / volatility * periods_per_year.sqrt() } else { 0.0 };

        Ok(Self {
            name,
            count,
            mean,
            volatility,
            sharpe,
            min: returns.iter().copied().fold(f64::INFINITY, f64::min),
            max: returns.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            win_rate: returns.iter().filter(|&&r| r > 0.0).count() as f64 / count as f64,
        })
    }
}

/// Welch's unequal-variance t-test of `mean(a) > mean(b)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTest {
    /// `(mean_a - mean_b) / sqrt(var_a / n_a + var_b / n_b)`.
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub degrees_of_freedom: f64,
    /// Two-sided p-value.
    pub p_value_two_sided: f64,
    /// One-sided p-value for the alternative `mean(a) > mean(b)`.
    pub p_value_one_sided: f64,
}

/// Run Welch's t-test on two samples.
///
/// # Errors
/// - `EmptyPartition` if either sample is empty.
/// - `InsufficientData` if either sample has fewer than two points.
/// - `DegenerateStatistic` if both samples have zero variance.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTest, ModelError> {
    for (label, sample) in [("sample A", a), ("sample B", b)] {
        if sample.is_empty() {
            return Err(ModelError::EmptyPartition(label.to_string()));
        }
        if sample.len() < 2 {
            return Err(ModelError::InsufficientData {
                context: format!("Welch t-test {label}"),
                required: 2,
                actual: sample.len(),
            });
        }
    }

    let (na, nb) = (a.len() as f64, b.len() as f64);
    let (va, vb) = match (sample_variance(a), sample_variance(b)) {
        (Some(va), Some(vb)) => (va / na, vb / nb),
        _ => return Err(ModelError::DegenerateStatistic("variance undefined".to_string())),
    };
    let se2 = va + vb;
    if se2 <= 0.0 {
        return Err(ModelError::DegenerateStatistic(
            "both samples have zero variance".to_string(),
        ));
    }

    let diff = match (mean(a), mean(b)) {
        (Some(ma), Some(mb)) => ma - mb,
        _ => return Err(ModelError::EmptyPartition("sample".to_string())),
    };
    let t_statistic = diff / se2.sqrt();
    let degrees_of_freedom = se2 * se2 / (va * va / (na - 1.0) + vb * vb / (nb - 1.0));
    let p_value_two_sided = student_t_two_sided_p_value(t_statistic, degrees_of_freedom)?;
    let p_value_one_sided = if t_statistic > 0.0 {
        p_value_two_sided / 2.0
    } else {
        1.0 - p_value_two_sided / 2.0
    };

    Ok(WelchTest { t_statistic, degrees_of_freedom, p_value_two_sided, p_value_one_sided })
}
