//! Regression column selection.

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Coefficient name of the constant term.
pub const INTERCEPT: &str = "intercept";

/// Coefficient name of the target-phase indicator.
pub const PHASE_INDICATOR: &str = "is_target_phase";

/// A factor column usable as a regressor.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorColumn {
    /// Market excess return (Mkt-RF).
    #[display("mkt_rf")]
    MarketExcess,
    /// Size factor (SMB).
    #[display("smb")]
    Size,
    /// Value factor (HML).
    #[display("hml")]
    Value,
}

impl FactorColumn {
    /// The three Fama-French factors in canonical order.
    pub const FAMA_FRENCH: [Self; 3] = [Self::MarketExcess, Self::Size, Self::Value];

    /// Coefficient name for this factor.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MarketExcess => "mkt_rf",
            Self::Size => "smb",
            Self::Value => "hml",
        }
    }
}

/// The regressand.
#[derive(Debug, Display, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetColumn {
    /// Asset return minus the risk-free rate.
    #[default]
    #[display("excess_return")]
    ExcessReturn,
    /// Raw asset return.
    #[display("asset_return")]
    AssetReturn,
}

/// Specification of a single factor regression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Factor regressors, in design-matrix order after the intercept.
    pub factors: Vec<FactorColumn>,
    /// Regressand.
    pub target: TargetColumn,
    /// Whether the target-phase indicator is appended as the last regressor.
    pub include_phase_indicator: bool,
}

impl Default for ModelSpec {
    fn default() -> Self {
        Self {
            factors: FactorColumn::FAMA_FRENCH.to_vec(),
            target: TargetColumn::ExcessReturn,
            include_phase_indicator: true,
        }
    }
}

impl ModelSpec {
    /// Create a new model specification.
    #[must_use]
    pub const fn new(
        factors: Vec<FactorColumn>,
        target: TargetColumn,
        include_phase_indicator: bool,
    ) -> Self {
        Self { factors, target, include_phase_indicator }
    }

    /// Number of design-matrix columns, intercept included.
    #[must_use]
    pub fn n_regressors(&self) -> usize {
        1 + self.factors.len() + usize::from(self.include_phase_indicator)
    }

    /// Smallest sample that leaves at least one residual degree of freedom.
    #[must_use]
    pub fn min_observations(&self) -> usize {
        self.n_regressors() + 1
    }

    /// Coefficient names in design-matrix order.
    #[must_use]
    pub fn coefficient_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(self.n_regressors());
        names.push(INTERCEPT);
        names.extend(self.factors.iter().map(|f| f.name()));
        if self.include_phase_indicator {
            names.push(PHASE_INDICATOR);
        }
        names
    }
}
