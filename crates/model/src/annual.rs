//! Calendar-year aggregation of daily returns.

use chrono::Datelike;
use cyclealpha_primitives::{CyclePhase, TimeSeriesFrame};
use serde::{Deserialize, Serialize};

/// Compounded asset return of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualReturn {
    /// Calendar year.
    pub year: i32,
    /// Cycle phase of the year.
    pub phase: CyclePhase,
    /// `prod(1 + r) - 1` over the year's observations.
    pub asset_return: f64,
    /// Number of daily observations in the year.
    pub observations: usize,
}

/// Compound daily asset returns within each calendar year, in date order.
#[must_use]
pub fn annual_returns(frame: &TimeSeriesFrame) -> Vec<AnnualReturn> {
    frame
        .observations()
        .chunk_by(|a, b| a.date.year() == b.date.year())
        .map(|days| AnnualReturn {
            year: days[0].date.year(),
            phase: days[0].cycle_phase,
            asset_return: days.iter().map(|o| 1.0 + o.asset_return).product::<f64>() - 1.0,
            observations: days.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use cyclealpha_primitives::{Date, Observation};

    use super::*;

    fn obs(y: i32, m: u32, d: u32, r: f64) -> Observation {
        Observation::new(Date::from_ymd_opt(y, m, d).unwrap(), r, 0.0, 0.0, 0.0, 0.0)
    }

    #[test]
    fn compounds_within_years() {
        let frame = TimeSeriesFrame::new(vec![
            obs(2023, 12, 29, 0.1),
            obs(2023, 3, 1, -0.5),
            obs(2024, 1, 2, 0.02),
            obs(2022, 6, 1, 0.01),
        ])
        .unwrap();

        let years = annual_returns(&frame);
        assert_eq!(years.iter().map(|y| y.year).collect::<Vec<_>>(), vec![2022, 2023, 2024]);
        assert_eq!(years[1].phase, CyclePhase::PreElection);
        assert_eq!(years[1].observations, 2);
        assert_relative_eq!(years[1].asset_return, 0.5 * 1.1 - 1.0, epsilon = 1e-12);
        assert_relative_eq!(years[2].asset_return, 0.02, epsilon = 1e-12);
    }

    #[test]
    fn empty_frame() {
        let frame = TimeSeriesFrame::new(Vec::new()).unwrap();
        assert!(annual_returns(&frame).is_empty());
    }
}
