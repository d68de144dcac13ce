//! Directional percentile ranking.

use hobart_factors::Direction;

/// Percentile rank (0-100, one decimal place) of `value` against `peers`.
///
/// The score is the share of non-null peers that are strictly worse than
/// `value` under `direction`: strictly smaller when higher is better,
/// strictly larger when lower is better. Ties never count as worse, so a
/// subject merely tied with the best peer does not reach 100.
///
/// Returns `None` when the value itself is missing or no peer carries a
/// value. Order-independent and deterministic.
pub fn percentile_rank(
    value: Option<f64>,
    peers: &[Option<f64>],
    direction: Direction,
) -> Option<f64> {
    let value = value?;

    let mut peer_count = 0usize;
    let mut worse = 0usize;
    for peer in peers.iter().copied().flatten() {
        peer_count += 1;
        let is_worse = match direction {
            Direction::HigherIsBetter => peer < value,
            Direction::LowerIsBetter => peer > value,
        };
        if is_worse {
            worse += 1;
        }
    }

    if peer_count == 0 {
        return None;
    }

    Some(round_to_tenth(worse as f64 / peer_count as f64 * 100.0))
}

/// Round to one decimal place, the fixed precision of all published scores.
pub(crate) fn round_to_tenth(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
