//! Bootstrap distribution type.

use serde::{Deserialize, Serialize};

/// Empirical distribution of a resampled statistic difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapDistribution {
    /// `statistic(resample_a) - statistic(resample_b)`, one per simulation, in draw order.
    pub differences: Vec<f64>,
    /// Fraction of differences at or below zero.
    pub p_value: f64,
    /// Draws discarded because a resample's statistic was undefined.
    pub degenerate_draws: usize,
    /// Difference on the original (non-resampled) partitions, if defined.
    pub observed: Option<f64>,
}

impl BootstrapDistribution {
    /// Build a distribution and derive its one-sided p-value.
    #[must_use]
    pub fn from_differences(
        differences: Vec<f64>,
        degenerate_draws: usize,
        observed: Option<f64>,
    ) -> Self {
        let p_value = if differences.is_empty() {
            f64::NAN
        } else {
            differences.iter().filter(|&&d| d <= 0.0).count() as f64 / differences.len() as f64
        };
        Self { differences, p_value, degenerate_draws, observed }
    }

    /// Number of simulations kept.
    #[must_use]
    pub const fn n_simulations(&self) -> usize {
        self.differences.len()
    }

    /// Mean of the differences.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.differences.is_empty() {
            return None;
        }
        Some(self.differences.iter().sum::<f64>() / self.differences.len() as f64)
    }

    /// Linearly interpolated quantile of the differences, `q` in `[0, 1]`.
    #[must_use]
    pub fn quantile(&self, q: f64) -> Option<f64> {
        if self.differences.is_empty() || !(0.0..=1.0).contains(&q) {
            return None;
        }
        let mut sorted = self.differences.clone();
        sorted.sort_by(f64::total_cmp);

        let pos = q * (sorted.len() - 1) as f64;
        let lo = pos.floor() as usize;
        let hi = pos.ceil() as usize;
        let frac = pos - lo as f64;
        Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
    }

    /// Two-sided percentile interval at the given confidence level.
    #[must_use]
    pub fn percentile_interval(&self, confidence: f64) -> Option<(f64, f64)> {
        let alpha = (1.0 - confidence) / 2.0;
        Some((self.quantile(alpha)?, self.quantile(1.0 - alpha)?))
    }
}
