//! Sample statistic trait definition.

/// A scalar summary of a return sample.
///
/// Returns `None` when the statistic is undefined for the sample, for example
/// a ratio whose denominator is a zero standard deviation.
pub trait Statistic: Send + Sync {
    /// Evaluate the statistic.
    fn compute(&self, sample: &[f64]) -> Option<f64>;

    /// Name used in reports.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<F> Statistic for F
where
    F: Fn(&[f64]) -> Option<f64> + Send + Sync,
{
    fn compute(&self, sample: &[f64]) -> Option<f64> {
        self(sample)
    }
}
