#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cyclealpha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod phase;
pub use phase::{CyclePhase, classify};

mod columns;
pub use columns::{FactorColumn, INTERCEPT, ModelSpec, PHASE_INDICATOR, TargetColumn};

mod observation;
pub use observation::Observation;

mod frame;
pub use frame::TimeSeriesFrame;

mod regression;
pub use regression::{Coefficient, RegressionResult};

mod rolling;
pub use rolling::{RollingPath, RollingPoint, WindowEstimate};

mod bootstrap;
pub use bootstrap::BootstrapDistribution;

mod drawdown;
pub use drawdown::DrawdownCurve;

mod error;
pub use error::FrameError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
