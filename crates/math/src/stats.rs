//! Descriptive statistics over return samples.

/// Arithmetic mean, `None` for an empty sample.
#[must_use]
pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Unbiased sample variance (denominator `n - 1`), `None` below two points.
#[must_use]
pub fn sample_variance(sample: &[f64]) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let mu = mean(sample)?;
    let ss: f64 = sample.iter().map(|x| (x - mu).powi(2)).sum();
    Some(ss / (sample.len() - 1) as f64)
}

/// Sample standard deviation (denominator `n - 1`), `None` below two points.
#[must_use]
pub fn sample_std(sample: &[f64]) -> Option<f64> {
    sample_variance(sample).map(f64::sqrt)
}

/// Annualized Sharpe-like ratio: `mean / std * sqrt(periods_per_year)`.
///
/// `None` when the standard deviation is zero or undefined; a constant sample
/// has no risk-adjusted return.
#[must_use]
pub fn annualized_sharpe(sample: &[f64], periods_per_year: f64) -> Option<f64> {
    // Rounding in the mean leaves a constant sample with a tiny nonzero spread.
    if sample.windows(2).all(|w| w[0] == w[1]) {
        return None;
    }
    let sd = sample_std(sample)?;
    if sd <= 0.0 || !sd.is_finite() {
        return None;
    }
    Some(mean(sample)? / sd * periods_per_year.sqrt())
}
