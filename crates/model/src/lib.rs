#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cyclealpha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod covariance;
pub use covariance::{ClassicalCovariance, CovarianceKind, HacCovariance};

mod regression;
pub use regression::{OlsRegressor, ReferenceDistribution, RegressionConfig};

mod rolling;
pub use rolling::{DEFAULT_WINDOW_SIZE, RollingConfig, RollingEstimator};

mod statistic;
pub use statistic::{AnnualizedSharpe, SampleMean, TRADING_DAYS_PER_YEAR};

mod bootstrap;
pub use bootstrap::{BootstrapConfig, BootstrapValidator};

mod drawdown;
pub use drawdown::DrawdownAnalyzer;

mod strategy;
pub use strategy::{CashPolicy, strategy_returns};

mod metrics;
pub use metrics::{PerformanceMetrics, WelchTest, welch_t_test};

mod annual;
pub use annual::{AnnualReturn, annual_returns};

mod pipeline;
pub use pipeline::{AnalysisConfig, AnalysisReport, PartitionMetrics, analyze};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use cyclealpha_traits::{Regressor, Statistic};

    pub use super::{
        AnalysisConfig, BootstrapValidator, DrawdownAnalyzer, ModelError, OlsRegressor,
        RollingEstimator, analyze,
    };
}
