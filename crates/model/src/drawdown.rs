//! Cumulative wealth and peak-to-trough loss.

use cyclealpha_primitives::DrawdownCurve;

use crate::ModelError;

/// Builds drawdown curves from return series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawdownAnalyzer {
    starting_wealth: f64,
}

impl Default for DrawdownAnalyzer {
    fn default() -> Self {
        Self { starting_wealth: 1.0 }
    }
}

impl DrawdownAnalyzer {
    /// Create an analyzer with the given starting wealth.
    ///
    /// # Errors
    /// Returns `InvalidInput` unless `starting_wealth` is positive and finite.
    pub fn new(starting_wealth: f64) -> Result<Self, ModelError> {
        if !(starting_wealth.is_finite() && starting_wealth > 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "starting wealth must be positive, got {starting_wealth}"
            )));
        }
        Ok(Self { starting_wealth })
    }

    /// Get the starting wealth.
    #[must_use]
    pub const fn starting_wealth(&self) -> f64 {
        self.starting_wealth
    }

    /// Compound `returns` into a wealth curve and its drawdown series.
    ///
    /// # Errors
    /// - `EmptyPartition` for an empty series.
    /// - `InvalidInput` for a non-finite return or one at or below -1.
    pub fn analyze(&self, returns: &[f64]) -> Result<DrawdownCurve, ModelError> {
        validate(returns)?;

        let mut wealth = Vec::with_capacity(returns.len() + 1);
        let mut drawdown = Vec::with_capacity(returns.len() + 1);
        let mut current = self.starting_wealth;
        let mut peak = current;
        let mut peak_at = 0;
        let (mut max_drawdown, mut peak_index, mut trough_index) = (0.0, 0, 0);

        wealth.push(current);
        drawdown.push(0.0);
        for (i, r) in returns.iter().enumerate() {
            current *= 1.0 + r;
            if current > peak {
                peak = current;
                peak_at = i + 1;
            }
            let dd = (current - peak) / peak;
            if dd < max_drawdown {
                max_drawdown = dd;
                peak_index = peak_at;
                trough_index = i + 1;
            }
            wealth.push(current);
            drawdown.push(dd);
        }

        Ok(DrawdownCurve { wealth, drawdown, max_drawdown, peak_index, trough_index })
    }

    /// Maximum drawdown only, in constant extra space.
    ///
    /// # Errors
    /// Same as [`Self::analyze`].
    pub fn max_drawdown(&self, returns: &[f64]) -> Result<f64, ModelError> {
        validate(returns)?;

        let (mut current, mut peak, mut worst) = (self.starting_wealth, self.starting_wealth, 0.0);
        for r in returns {
            current *= 1.0 + r;
            peak = f64::max(peak, current);
            worst = f64::min(worst, (current - peak) / peak);
        }
        Ok(worst)
    }
}

fn validate(returns: &[f64]) -> Result<(), ModelError> {
    if returns.is_empty() {
        return Err(ModelError::EmptyPartition("return series".to_string()));
    }
    let invalid = |r: f64| !r.is_finite() || r <= -1.0;
    if let Some((i, r)) = returns.iter().enumerate().find(|(_, r)| invalid(**r)) {
        return Err(ModelError::InvalidInput(format!("return {r} at index {i}")));
    }
    Ok(())
}
