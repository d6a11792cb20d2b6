#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/cyclealpha/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod align;
pub use align::{ColumnMap, align};

mod export;
pub use export::{drawdown_to_frame, rolling_path_to_frame};

mod error;
pub use error::UtilsError;
