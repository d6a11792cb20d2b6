#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cyclealpha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod linalg;
pub use linalg::{OlsFit, invert, ordinary_least_squares, solve_linear_system};

mod hac;
pub use hac::{bartlett_weight, newey_west_meat, sandwich};

mod distributions;
pub use distributions::{
    normal_two_sided_p_value, standard_normal_cdf, student_t_cdf, student_t_two_sided_p_value,
};

mod stats;
pub use stats::{annualized_sharpe, mean, sample_std, sample_variance};

mod error;
pub use error::MathError;
