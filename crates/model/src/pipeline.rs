//! End-to-end analysis of a tagged frame.

use cyclealpha_primitives::{
    BootstrapDistribution, Date, DrawdownCurve, ModelSpec, RegressionResult, RollingPath,
    TimeSeriesFrame,
};
use cyclealpha_traits::Regressor;
use serde::{Deserialize, Serialize};

use crate::{
    AnnualReturn, AnnualizedSharpe, BootstrapConfig, BootstrapValidator, CashPolicy,
    DrawdownAnalyzer, ModelError, OlsRegressor, PerformanceMetrics, RegressionConfig,
    RollingConfig, RollingEstimator, TRADING_DAYS_PER_YEAR, WelchTest, annual_returns,
    strategy_returns, welch_t_test,
};

/// Settings for [`analyze`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Regression specification shared by the full-sample and rolling fits.
    pub spec: ModelSpec,
    /// Regression inference settings.
    pub regression: RegressionConfig,
    /// Rolling window settings.
    pub rolling: RollingConfig,
    /// Bootstrap settings.
    pub bootstrap: BootstrapConfig,
    /// Overlay cash treatment.
    pub cash: CashPolicy,
    /// Starting wealth of the drawdown curves.
    pub starting_wealth: f64,
    /// Annualization factor for Sharpe ratios.
    pub periods_per_year: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            spec: ModelSpec::default(),
            regression: RegressionConfig::default(),
            rolling: RollingConfig::default(),
            bootstrap: BootstrapConfig::default(),
            cash: CashPolicy::default(),
            starting_wealth: 1.0,
            periods_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

/// Metrics for the target phase, the other phases and the whole sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartitionMetrics {
    /// Target-phase excess returns.
    pub target: PerformanceMetrics,
    /// Excess returns outside the target phase.
    pub rest: PerformanceMetrics,
    /// All excess returns.
    pub all: PerformanceMetrics,
}

/// Everything [`analyze`] computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Observations in the frame.
    pub n_observations: usize,
    /// First date in the frame.
    pub start_date: Option<Date>,
    /// Last date in the frame.
    pub end_date: Option<Date>,
    /// Full-sample regression.
    pub full_sample: RegressionResult,
    /// Rolling path; `None` when the frame is shorter than the window.
    pub rolling: Option<RollingPath>,
    /// Bootstrap of the annualized Sharpe difference, target minus rest.
    pub bootstrap: BootstrapDistribution,
    /// Welch test of target versus rest mean excess return.
    pub welch: WelchTest,
    /// Partition metrics.
    pub metrics: PartitionMetrics,
    /// Buy-and-hold wealth curve.
    pub buy_and_hold: DrawdownCurve,
    /// Target-phase overlay wealth curve.
    pub overlay: DrawdownCurve,
    /// Compounded asset return per calendar year.
    pub annual: Vec<AnnualReturn>,
}

/// Run the full analysis on a frame.
///
/// # Errors
/// Propagates the first failing stage: an unidentifiable full-sample fit,
/// an empty phase partition, a degenerate bootstrap or Welch test.
pub fn analyze(
    frame: &TimeSeriesFrame,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, ModelError> {
    if frame.is_empty() {
        return Err(ModelError::EmptyPartition("frame".to_string()));
    }
    tracing::info!(
        observations = frame.len(),
        start = ?frame.first_date(),
        end = ?frame.last_date(),
        "starting analysis"
    );

    let regressor = OlsRegressor::with_config(config.regression);
    let full_sample = regressor.fit_frame(frame, &config.spec)?;
    tracing::info!(r_squared = full_sample.r_squared, "full-sample fit complete");

    let rolling = if frame.len() < config.rolling.window_size {
        tracing::info!(
            observations = frame.len(),
            window_size = config.rolling.window_size,
            "frame shorter than rolling window, skipping"
        );
        None
    } else {
        let path = RollingEstimator::with_regressor(config.rolling, regressor)
            .roll(frame, &config.spec)?;
        tracing::info!(
            windows = path.len(),
            undefined = path.n_undefined(),
            "rolling fit complete"
        );
        Some(path)
    };

    let (target, rest) = frame.partition_target();
    let statistic = AnnualizedSharpe { periods_per_year: config.periods_per_year };
    let bootstrap =
        BootstrapValidator::new(config.bootstrap).bootstrap(&target, &rest, &statistic)?;
    tracing::info!(
        simulations = bootstrap.n_simulations(),
        degenerate_draws = bootstrap.degenerate_draws,
        p_value = bootstrap.p_value,
        "bootstrap complete"
    );

    let welch = welch_t_test(&target, &rest)?;
    let periods = config.periods_per_year;
    let metrics = PartitionMetrics {
        target: PerformanceMetrics::compute("target phase", &target, periods)?,
        rest: PerformanceMetrics::compute("other phases", &rest, periods)?,
        all: PerformanceMetrics::compute("all", &frame.excess_returns(), periods)?,
    };

    let analyzer = DrawdownAnalyzer::new(config.starting_wealth)?;
    let buy_and_hold = analyzer.analyze(&frame.asset_returns())?;
    let overlay = analyzer.analyze(&strategy_returns(frame, config.cash))?;
    tracing::info!(
        buy_and_hold = buy_and_hold.max_drawdown,
        overlay = overlay.max_drawdown,
        "max drawdowns"
    );

    Ok(AnalysisReport {
        n_observations: frame.len(),
        start_date: frame.first_date(),
        end_date: frame.last_date(),
        full_sample,
        rolling,
        bootstrap,
        welch,
        metrics,
        buy_and_hold,
        overlay,
        annual: annual_returns(frame),
    })
}
