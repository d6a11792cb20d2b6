//! Phase-timed strategy overlay.

use cyclealpha_primitives::TimeSeriesFrame;
use serde::{Deserialize, Serialize};

/// What the overlay earns outside the target phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashPolicy {
    /// Uninvested cash returns nothing.
    #[default]
    Zero,
    /// Cash earns the day's risk-free rate.
    RiskFree,
}

/// Daily returns of holding the asset only during the target phase.
#[must_use]
pub fn strategy_returns(frame: &TimeSeriesFrame, cash: CashPolicy) -> Vec<f64> {
    frame
        .iter()
        .map(|o| match (o.is_target_phase, cash) {
            (true, _) => o.asset_return,
            (false, CashPolicy::Zero) => 0.0,
            (false, CashPolicy::RiskFree) => o.risk_free_rate,
        })
        .collect()
}
