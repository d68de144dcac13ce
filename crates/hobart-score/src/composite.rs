//! Null-excluding weighted composites.

use crate::error::ScoreError;
use crate::rank::round_to_tenth;

/// Weighted average of nullable scores, renormalized over available entries.
///
/// Null scores contribute to neither the weighted sum nor the weight base,
/// so missing metrics shrink the denominator instead of dragging the
/// composite down. A zero total weight (all scores null, or all weights
/// zero) yields `Ok(None)`.
///
/// Mismatched slice lengths are a caller defect and fail loudly rather than
/// silently truncating.
pub fn weighted_average(
    scores: &[Option<f64>],
    weights: &[f64],
) -> Result<Option<f64>, ScoreError> {
    if scores.len() != weights.len() {
        return Err(ScoreError::LengthMismatch {
            scores: scores.len(),
            weights: weights.len(),
        });
    }

    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;
    for (score, weight) in scores.iter().zip(weights) {
        if let Some(score) = score {
            weighted_sum += score * weight;
            total_weight += weight;
        }
    }

    if total_weight == 0.0 {
        return Ok(None);
    }

    Ok(Some(round_to_tenth(weighted_sum / total_weight)))
}
