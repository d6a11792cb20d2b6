//! Drawdown curve type.

use serde::{Deserialize, Serialize};

/// Cumulative wealth and its decline from the running peak.
///
/// Both series start with the initial wealth, so they are one element longer
/// than the return series they were built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownCurve {
    /// Wealth after each step; `wealth[0]` is the starting wealth.
    pub wealth: Vec<f64>,
    /// `(wealth - running_peak) / running_peak` at each step, in `(-1, 0]`.
    pub drawdown: Vec<f64>,
    /// Most negative drawdown over the horizon.
    pub max_drawdown: f64,
    /// Index of the peak preceding the deepest trough.
    pub peak_index: usize,
    /// Index of the deepest trough.
    pub trough_index: usize,
}

impl DrawdownCurve {
    /// Starting wealth.
    #[must_use]
    pub fn starting_wealth(&self) -> f64 {
        self.wealth.first().copied().unwrap_or(f64::NAN)
    }

    /// Wealth at the end of the horizon.
    #[must_use]
    pub fn final_wealth(&self) -> f64 {
        self.wealth.last().copied().unwrap_or(f64::NAN)
    }

    /// Total compounded return over the horizon.
    #[must_use]
    pub fn total_return(&self) -> f64 {
        self.final_wealth() / self.starting_wealth() - 1.0
    }

    /// Number of steps between the peak and the deepest trough.
    #[must_use]
    pub const fn decline_length(&self) -> usize {
        self.trough_index.saturating_sub(self.peak_index)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn curve_accessors() {
        let curve = DrawdownCurve {
            wealth: vec![100.0, 110.0, 55.0, 60.5],
            drawdown: vec![0.0, 0.0, -0.5, -0.45],
            max_drawdown: -0.5,
            peak_index: 1,
            trough_index: 2,
        };
        assert_eq!(curve.starting_wealth(), 100.0);
        assert_eq!(curve.final_wealth(), 60.5);
        assert_relative_eq!(curve.total_return(), -0.395, epsilon = 1e-12);
        assert_eq!(curve.decline_length(), 1);
    }

    #[test]
    fn decline_length_with_inverted_indices() {
        let curve: DrawdownCurve = serde_json::from_str(
            r#"{"wealth":[1.0,1.1],"drawdown":[0.0,0.0],"max_drawdown":0.0,
                "peak_index":3,"trough_index":1}"#,
        )
        .unwrap();
        assert_eq!(curve.decline_length(), 0);
    }
}
