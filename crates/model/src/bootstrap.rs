//! Two-sample bootstrap of a performance differential.

use cyclealpha_primitives::BootstrapDistribution;
use cyclealpha_traits::Statistic;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::ModelError;

/// Configuration for bootstrap validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Number of simulations kept in the distribution.
    pub n_simulations: usize,
    /// Seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Consecutive degenerate draws tolerated for one simulation.
    pub max_redraws: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self { n_simulations: 10_000, seed: None, max_redraws: 1_000 }
    }
}

/// Resamples two partitions independently, with replacement, and records
/// `statistic(resample_a) - statistic(resample_b)` per simulation.
///
/// A draw where either statistic is undefined is discarded, counted in
/// [`BootstrapDistribution::degenerate_draws`] and redrawn, so the
/// distribution always holds exactly `n_simulations` differences.
#[derive(Debug, Clone, Default)]
pub struct BootstrapValidator {
    config: BootstrapConfig,
}

impl BootstrapValidator {
    /// Create a validator.
    #[must_use]
    pub const fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the bootstrap.
    ///
    /// # Errors
    /// - `EmptyPartition` if either partition is empty.
    /// - `InvalidConfig` if `n_simulations` is zero.
    /// - `DegenerateStatistic` if a simulation exceeds `max_redraws`.
    pub fn bootstrap<S: Statistic + ?Sized>(
        &self,
        partition_a: &[f64],
        partition_b: &[f64],
        statistic: &S,
    ) -> Result<BootstrapDistribution, ModelError> {
        if partition_a.is_empty() {
            return Err(ModelError::EmptyPartition("partition A".to_string()));
        }
        if partition_b.is_empty() {
            return Err(ModelError::EmptyPartition("partition B".to_string()));
        }
        let n_simulations = self.config.n_simulations;
        if n_simulations == 0 {
            return Err(ModelError::InvalidConfig("n_simulations must be positive".to_string()));
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sample_a = vec![0.0; partition_a.len()];
        let mut sample_b = vec![0.0; partition_b.len()];
        let mut differences = Vec::with_capacity(n_simulations);
        let mut degenerate_draws = 0;

        for _ in 0..n_simulations {
            let mut redraws = 0;
            let value = loop {
                resample(&mut rng, partition_a, &mut sample_a);
                resample(&mut rng, partition_b, &mut sample_b);
                if let Some(d) = difference(statistic, &sample_a, &sample_b) {
                    break d;
                }
                degenerate_draws += 1;
                redraws += 1;
                if redraws > self.config.max_redraws {
                    return Err(ModelError::DegenerateStatistic(format!(
                        "{} undefined on {} consecutive resamples",
                        statistic.name(),
                        redraws
                    )));
                }
            };
            differences.push(value);
        }

        if degenerate_draws > 0 {
            tracing::warn!(
                statistic = statistic.name(),
                degenerate_draws,
                "bootstrap redrew resamples with an undefined statistic"
            );
        }

        let observed = difference(statistic, partition_a, partition_b);
        Ok(BootstrapDistribution::from_differences(differences, degenerate_draws, observed))
    }
}

fn resample<R: Rng>(rng: &mut R, source: &[f64], target: &mut [f64]) {
    for slot in target.iter_mut() {
        *slot = source[rng.gen_range(0..source.len())];
    }
}

fn difference<S: Statistic + ?Sized>(statistic: &S, a: &[f64], b: &[f64]) -> Option<f64> {
    let d = statistic.compute(a)? - statistic.compute(b)?;
    d.is_finite().then_some(d)
}
