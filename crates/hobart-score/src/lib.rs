#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/hobart/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod composite;
pub mod error;
pub mod profile;
pub mod rank;
pub mod scored;

pub use composite::weighted_average;
pub use error::ScoreError;
pub use profile::ScoreWeightProfile;
pub use rank::percentile_rank;
pub use scored::{PeerSetStats, ScoredSecurity};
