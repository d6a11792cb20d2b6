//! Daily observation type.

use serde::{Deserialize, Serialize};

use crate::{CyclePhase, Date, FactorColumn, TargetColumn};

/// One trading day of aligned asset and factor returns.
///
/// All return fields are decimal fractions (0.01 is one percent).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading date.
    pub date: Date,
    /// Asset return.
    pub asset_return: f64,
    /// Risk-free rate over the same period.
    pub risk_free_rate: f64,
    /// Market excess return (Mkt-RF).
    pub market_excess_return: f64,
    /// Size factor return (SMB).
    pub size_factor: f64,
    /// Value factor return (HML).
    pub value_factor: f64,
    /// Cycle phase of the date's calendar year.
    pub cycle_phase: CyclePhase,
    /// Whether `cycle_phase` is the phase under test.
    pub is_target_phase: bool,
}

impl Observation {
    /// Create an observation, tagging it with the cycle phase of its year.
    #[must_use]
    pub fn new(
        date: Date,
        asset_return: f64,
        risk_free_rate: f64,
        market_excess_return: f64,
        size_factor: f64,
        value_factor: f64,
    ) -> Self {
        let cycle_phase = CyclePhase::of_date(date);
        Self {
            date,
            asset_return,
            risk_free_rate,
            market_excess_return,
            size_factor,
            value_factor,
            cycle_phase,
            is_target_phase: cycle_phase.is_target(),
        }
    }

    /// Asset return in excess of the risk-free rate.
    #[must_use]
    pub fn excess_return(&self) -> f64 {
        self.asset_return - self.risk_free_rate
    }

    /// Value of a factor column.
    #[must_use]
    pub const fn factor(&self, column: FactorColumn) -> f64 {
        match column {
            FactorColumn::MarketExcess => self.market_excess_return,
            FactorColumn::Size => self.size_factor,
            FactorColumn::Value => self.value_factor,
        }
    }

    /// Value of the regressand.
    #[must_use]
    pub fn target(&self, column: TargetColumn) -> f64 {
        match column {
            TargetColumn::ExcessReturn => self.excess_return(),
            TargetColumn::AssetReturn => self.asset_return,
        }
    }

    /// The target-phase indicator as a regressor value.
    #[must_use]
    pub fn indicator(&self) -> f64 {
        if self.is_target_phase { 1.0 } else { 0.0 }
    }

    /// Whether the phase tags match the date's calendar year.
    #[must_use]
    pub fn has_consistent_phase(&self) -> bool {
        self.cycle_phase == CyclePhase::of_date(self.date)
            && self.is_target_phase == self.cycle_phase.is_target()
    }

    /// Name of the first non-finite numeric field, if any.
    #[must_use]
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("asset_return", self.asset_return),
            ("risk_free_rate", self.risk_free_rate),
            ("market_excess_return", self.market_excess_return),
            ("size_factor", self.size_factor),
            ("value_factor", self.value_factor),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}
