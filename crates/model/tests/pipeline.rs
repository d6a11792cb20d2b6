//! End-to-end analysis over a synthetic multi-cycle sample.
#![allow(missing_docs)]

use approx::assert_relative_eq;
use chrono::{Datelike, Duration, Weekday};
use cyclealpha_model::{
    AnalysisConfig, BootstrapConfig, CashPolicy, ModelError, RollingConfig, analyze,
};
use cyclealpha_primitives::{CyclePhase, Date, Observation, TimeSeriesFrame};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Normal};

/// Weekday observations from 2019 through 2024 with a small target-phase premium.
fn sample() -> TimeSeriesFrame {
    let mut rng = StdRng::seed_from_u64(2024);
    let noise = Normal::new(0.0, 0.004).unwrap();
    let mut observations = Vec::new();
    let mut date = Date::from_ymd_opt(2019, 1, 1).unwrap();
    let end = Date::from_ymd_opt(2024, 12, 31).unwrap();

    while date <= end {
        if !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            let mkt = rng.gen_range(-0.02..0.02);
            let smb = rng.gen_range(-0.008..0.008);
            let hml = rng.gen_range(-0.008..0.008);
            let rf = 0.00008;
            let premium = if CyclePhase::of_date(date).is_target() { 0.0008 } else { 0.0 };
            let asset = rf + 0.95 * mkt + 0.25 * smb + premium + noise.sample(&mut rng);
            observations.push(Observation::new(date, asset, rf, mkt, smb, hml));
        }
        date += Duration::days(1);
    }

    TimeSeriesFrame::new(observations).unwrap()
}

fn config() -> AnalysisConfig {
    AnalysisConfig {
        rolling: RollingConfig { window_size: 252 },
        bootstrap: BootstrapConfig { n_simulations: 500, seed: Some(42), max_redraws: 100 },
        ..Default::default()
    }
}

#[test]
fn full_pipeline() {
    let frame = sample();
    let report = analyze(&frame, &config()).unwrap();

    assert_eq!(report.n_observations, frame.len());
    assert_eq!(report.start_date, frame.first_date());
    assert_eq!(report.end_date, frame.last_date());

    let fit = &report.full_sample;
    assert_eq!(fit.names(), vec!["intercept", "mkt_rf", "smb", "hml", "is_target_phase"]);
    assert_relative_eq!(fit.estimate("mkt_rf").unwrap(), 0.95, epsilon = 0.03);
    assert_relative_eq!(fit.estimate("hml").unwrap(), 0.0, epsilon = 0.05);
    assert!(fit.r_squared > 0.5);

    let rolling = report.rolling.as_ref().unwrap();
    assert_eq!(rolling.len(), frame.len() - 252 + 1);
    // Windows inside 2020-2022 contain no target-phase day.
    assert!(rolling.n_undefined() > 0);
    assert!(rolling.n_undefined() < rolling.len());

    assert_eq!(report.bootstrap.n_simulations(), 500);
    assert!((0.0..=1.0).contains(&report.bootstrap.p_value));
    assert!(report.bootstrap.observed.is_some());

    assert!((0.0..=1.0).contains(&report.welch.p_value_one_sided));
    assert_eq!(
        report.metrics.target.count + report.metrics.rest.count,
        report.metrics.all.count
    );

    assert_eq!(report.buy_and_hold.wealth.len(), frame.len() + 1);
    assert_eq!(report.overlay.wealth.len(), frame.len() + 1);
    assert!(report.buy_and_hold.max_drawdown <= 0.0);
    assert!(report.overlay.max_drawdown <= 0.0);

    let years: Vec<i32> = report.annual.iter().map(|y| y.year).collect();
    assert_eq!(years, (2019..=2024).collect::<Vec<_>>());
    assert_eq!(report.annual.iter().map(|y| y.observations).sum::<usize>(), frame.len());
}

#[test]
fn seeded_pipeline_is_reproducible() {
    let frame = sample();
    let first = analyze(&frame, &config()).unwrap();
    let second = analyze(&frame, &config()).unwrap();
    assert_eq!(first.bootstrap.differences, second.bootstrap.differences);
    assert_eq!(first.full_sample, second.full_sample);
}

#[test]
fn short_frame_skips_rolling() {
    let frame = sample();
    let long_window =
        AnalysisConfig { rolling: RollingConfig { window_size: frame.len() + 1 }, ..config() };
    let report = analyze(&frame, &long_window).unwrap();
    assert!(report.rolling.is_none());
}

#[test]
fn risk_free_cash_lifts_overlay() {
    let frame = sample();
    let zero = analyze(&frame, &config()).unwrap();
    let risk_free = AnalysisConfig { cash: CashPolicy::RiskFree, ..config() };
    let cash = analyze(&frame, &risk_free).unwrap();
    assert!(cash.overlay.final_wealth() > zero.overlay.final_wealth());
    assert_relative_eq!(
        cash.buy_and_hold.final_wealth(),
        zero.buy_and_hold.final_wealth(),
        epsilon = 1e-12
    );
}

#[test]
fn single_phase_sample_fails_full_fit() {
    let frame = sample().filter_phase(CyclePhase::Midterm);
    let err = analyze(&frame, &config()).unwrap_err();
    assert!(err.is_recoverable());
    assert!(matches!(err, ModelError::Estimator(_)));
}
