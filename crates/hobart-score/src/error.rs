//! Scoring errors.

use thiserror::Error;

/// Errors that can occur while scoring.
///
/// Missing data is never an error in this crate; these variants all signal
/// caller defects or unusable configuration.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// Score and weight slices passed to the aggregator differ in length.
    #[error("score/weight length mismatch: {scores} scores vs {weights} weights")]
    LengthMismatch {
        /// Number of scores supplied.
        scores: usize,
        /// Number of weights supplied.
        weights: usize,
    },

    /// A weight profile referenced a metric the registry does not know.
    #[error("weight profile '{profile}' references unknown metric '{metric}'")]
    UnknownMetric {
        /// Profile name.
        profile: String,
        /// The offending metric key.
        metric: String,
    },

    /// Failed to read a profile file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse a profile file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
