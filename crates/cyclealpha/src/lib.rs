//! # cyclealpha
//!
//! Rolling factor regression and resampling validation of a calendar-cycle
//! effect in asset returns.
//!
//! This crate provides a unified interface to the cyclealpha crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Observations, frames, cycle phases and result types
//! - `traits`: Regressor, covariance and statistic abstractions
//! - `math`: Linear algebra, HAC covariance and reference distributions
//! - `model`: Regression, rolling estimation, bootstrap and drawdown
//! - `utils`: Polars alignment and export
//! - `cli`: The `cyclealpha` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use cyclealpha::{model::{AnalysisConfig, analyze}, utils::{ColumnMap, align}};
//!
//! let frame = align(returns, factors, &ColumnMap::default())?;
//! let report = analyze(&frame, &AnalysisConfig::default())?;
//! println!("{:?}", report.full_sample.get("is_target_phase"));
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use cyclealpha_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use cyclealpha_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use cyclealpha_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use cyclealpha_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use cyclealpha_utils as utils;
