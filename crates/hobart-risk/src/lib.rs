#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod beta;
pub mod nav;

pub use beta::{CashEquivalents, RawBetas, ResolvedBetas, resolve_betas};
pub use nav::{
    NavSnapshot, RiskMetricsConfig, RiskMetricsResult, compute_risk_metrics, trailing_window,
};
