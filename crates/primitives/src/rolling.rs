//! Rolling regression path types.

use serde::{Deserialize, Serialize};

use crate::{Date, RegressionResult};

/// Estimate for one rolling window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WindowEstimate {
    /// The window was fitted.
    Fitted(RegressionResult),
    /// The window's design was degenerate; no coefficients exist.
    Undefined {
        /// Why the window could not be fitted.
        reason: String,
    },
}

impl WindowEstimate {
    /// The fitted result, if any.
    #[must_use]
    pub const fn fitted(&self) -> Option<&RegressionResult> {
        match self {
            Self::Fitted(result) => Some(result),
            Self::Undefined { .. } => None,
        }
    }

    /// Whether the window carries the undefined marker.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined { .. })
    }
}

/// One point on a rolling path, keyed by the window's last date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPoint {
    /// Date of the last observation in the window.
    pub date: Date,
    /// Date of the first observation in the window.
    pub start_date: Date,
    /// Window estimate.
    pub estimate: WindowEstimate,
}

/// Chronological sequence of rolling-window estimates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingPath {
    /// Observations per window.
    pub window_size: usize,
    /// One point per window end, in date order.
    pub points: Vec<RollingPoint>,
}

impl RollingPath {
    /// Number of windows.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over points in date order.
    pub fn iter(&self) -> std::slice::Iter<'_, RollingPoint> {
        self.points.iter()
    }

    /// Number of windows carrying the undefined marker.
    #[must_use]
    pub fn n_undefined(&self) -> usize {
        self.points.iter().filter(|p| p.estimate.is_undefined()).count()
    }

    /// Path of one coefficient's estimate; `None` for undefined windows.
    #[must_use]
    pub fn coefficient_series(&self, name: &str) -> Vec<(Date, Option<f64>)> {
        self.points
            .iter()
            .map(|p| (p.date, p.estimate.fitted().and_then(|r| r.estimate(name))))
            .collect()
    }
}
