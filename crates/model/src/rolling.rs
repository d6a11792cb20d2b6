//! Rolling-window regression.

use cyclealpha_primitives::{ModelSpec, RollingPath, RollingPoint, TimeSeriesFrame, WindowEstimate};
use cyclealpha_traits::Regressor;
use serde::{Deserialize, Serialize};

use crate::{ModelError, OlsRegressor};

/// Five years of daily observations.
pub const DEFAULT_WINDOW_SIZE: usize = 1260;

/// Configuration for rolling estimation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingConfig {
    /// Observations per window.
    pub window_size: usize,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self { window_size: DEFAULT_WINDOW_SIZE }
    }
}

/// Re-fits a regression over every full trailing window of a frame.
///
/// Windows whose design is singular (typically a window with no target-phase
/// days) yield [`WindowEstimate::Undefined`] instead of aborting the path.
#[derive(Debug, Clone, Default)]
pub struct RollingEstimator<R: Regressor = OlsRegressor> {
    config: RollingConfig,
    regressor: R,
}

impl RollingEstimator<OlsRegressor> {
    /// Create a rolling OLS estimator with the given window size.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        Self::with_regressor(RollingConfig { window_size }, OlsRegressor::new())
    }
}

impl<R: Regressor> RollingEstimator<R> {
    /// Create a rolling estimator around an arbitrary regressor.
    #[must_use]
    pub const fn with_regressor(config: RollingConfig, regressor: R) -> Self {
        Self { config, regressor }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RollingConfig {
        &self.config
    }

    /// Fit every window `[i - w + 1, i]` for `i >= w - 1`.
    ///
    /// The path has `len - w + 1` points, dated by each window's last
    /// observation. A frame shorter than the window gives an empty path.
    ///
    /// # Errors
    /// - `InvalidConfig` for a zero window.
    /// - `InsufficientData` if the window cannot identify the model.
    /// - Any non-recoverable estimator error from a window.
    pub fn roll(
        &self,
        frame: &TimeSeriesFrame,
        spec: &ModelSpec,
    ) -> Result<RollingPath, ModelError> {
        let window_size = self.config.window_size;
        if window_size == 0 {
            return Err(ModelError::InvalidConfig("window size must be positive".to_string()));
        }
        let required = spec.min_observations();
        if window_size < required {
            return Err(ModelError::InsufficientData {
                context: "rolling window".to_string(),
                required,
                actual: window_size,
            });
        }

        let mut points = Vec::with_capacity(frame.len().saturating_sub(window_size - 1));
        for window in frame.observations().windows(window_size) {
            let (first, last) = (window[0].date, window[window_size - 1].date);
            let estimate = match self.regressor.fit(window, spec) {
                Ok(result) => WindowEstimate::Fitted(result),
                Err(e) if e.is_recoverable() => {
                    tracing::debug!(end = %last, reason = %e, "window estimate undefined");
                    WindowEstimate::Undefined { reason: e.to_string() }
                }
                Err(e) => return Err(e.into()),
            };
            points.push(RollingPoint { date: last, start_date: first, estimate });
        }

        tracing::debug!(
            window_size,
            points = points.len(),
            undefined = points.iter().filter(|p| p.estimate.is_undefined()).count(),
            "rolling path complete"
        );

        Ok(RollingPath { window_size, points })
    }
}
