//! Built-in sample statistics for resampling.

use cyclealpha_math::{annualized_sharpe, mean};
use cyclealpha_traits::Statistic;

/// Trading days per calendar year.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Annualized Sharpe-like ratio of a return sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnualizedSharpe {
    /// Sampling frequency used for annualization.
    pub periods_per_year: f64,
}

impl Default for AnnualizedSharpe {
    fn default() -> Self {
        Self { periods_per_year: TRADING_DAYS_PER_YEAR }
    }
}

impl Statistic for AnnualizedSharpe {
    fn compute(&self, sample: &[f64]) -> Option<f64> {
        annualized_sharpe(sample, self.periods_per_year)
    }

    fn name(&self) -> &str {
        "annualized_sharpe"
    }
}

/// Arithmetic mean of a return sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleMean;

impl Statistic for SampleMean {
    fn compute(&self, sample: &[f64]) -> Option<f64> {
        mean(sample)
    }

    fn name(&self) -> &str {
        "mean"
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn sharpe_matches_definition() {
        let x = [0.02, 0.03, -0.01, 0.04];
        let sd = (0.0014_f64 / 3.0).sqrt();
        assert_relative_eq!(
            AnnualizedSharpe::default().compute(&x).unwrap(),
            0.02 / sd * 252.0_f64.sqrt(),
            epsilon = 1e-12
        );
        assert_eq!(AnnualizedSharpe::default().compute(&[0.01, 0.01, 0.01]), None);
        assert_eq!(AnnualizedSharpe::default().name(), "annualized_sharpe");
    }

    #[test]
    fn mean_of_empty_is_undefined() {
        assert_eq!(SampleMean.compute(&[]), None);
        assert_relative_eq!(SampleMean.compute(&[1.0, 2.0]).unwrap(), 1.5);
    }
}
