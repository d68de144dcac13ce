#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod extract;
pub mod metrics;
pub mod registry;
pub mod snapshot;

pub use extract::extract_metrics;
pub use metrics::SecurityMetrics;
pub use registry::{
    Direction, MetricCategory, MetricDef, RegistryError, available_metrics, get_metric,
    metrics_in_category,
};
pub use snapshot::{FundamentalSnapshot, PriceHistory};
