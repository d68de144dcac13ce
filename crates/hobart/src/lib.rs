#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod engine;
pub mod universe;

// Re-export main types from sub-crates
pub use hobart_factors as factors;
pub use hobart_output as output;
pub use hobart_risk as risk;
pub use hobart_score as score;

pub use engine::ScoringEngine;
pub use universe::{BenchmarkScope, BenchmarkWeights, PeerScope, PeerSet, ScopeMode, UniverseScope};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
