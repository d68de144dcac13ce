//! Scored-security result types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hobart_factors::{MetricCategory, SecurityMetrics};

/// Minimum peer count below which a ranking is flagged low-confidence.
pub const MIN_PEERS: usize = 10;
/// Minimum fraction of peers with complete data below which a ranking is
/// flagged low-confidence.
pub const MIN_COMPLETE_FRACTION: f64 = 0.80;

/// Size and completeness of the peer set a security was ranked against.
///
/// A reporting signal only: low confidence never alters the ranking
/// formula, it just travels with the result so the dashboard can flag it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeerSetStats {
    /// Number of securities in the peer set.
    pub peers: usize,
    /// Fraction of peers carrying a complete metric battery.
    pub complete_fraction: f64,
    /// Whether the ranking should be presented as low-confidence.
    pub low_confidence: bool,
}

impl PeerSetStats {
    /// Build stats from a peer count and the count with complete data.
    pub fn new(peers: usize, complete: usize) -> Self {
        let complete_fraction = if peers == 0 {
            0.0
        } else {
            complete as f64 / peers as f64
        };
        Self {
            peers,
            complete_fraction,
            low_confidence: peers < MIN_PEERS || complete_fraction < MIN_COMPLETE_FRACTION,
        }
    }
}

/// One security's full scoring result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSecurity {
    /// Ticker symbol.
    pub ticker: String,
    /// The raw metric battery the scores were computed from.
    pub metrics: SecurityMetrics,
    /// Percentile score per metric, keyed by registry name.
    pub metric_scores: BTreeMap<String, Option<f64>>,
    /// Composite score per category.
    pub category_scores: BTreeMap<MetricCategory, Option<f64>>,
    /// Total score across categories under the profile's category weights.
    ///
    /// `None` exactly when every category composite is `None` or every
    /// category weight is zero.
    pub total_score: Option<f64>,
    /// Peer-set quality for the scope this security was ranked in.
    pub peer_stats: PeerSetStats,
}

impl ScoredSecurity {
    /// Percentile score for one metric, if it was computable.
    pub fn metric_score(&self, metric: &str) -> Option<f64> {
        self.metric_scores.get(metric).copied().flatten()
    }

    /// Composite score for one category, if it was computable.
    pub fn category_score(&self, category: MetricCategory) -> Option<f64> {
        self.category_scores.get(&category).copied().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peer_stats_flag_small_peer_sets() {
        let stats = PeerSetStats::new(4, 4);
        assert!(stats.low_confidence);
        assert_eq!(stats.complete_fraction, 1.0);
    }

    #[test]
    fn peer_stats_flag_incomplete_peer_sets() {
        let stats = PeerSetStats::new(50, 30);
        assert!(stats.low_confidence);

        let stats = PeerSetStats::new(50, 45);
        assert!(!stats.low_confidence);
    }

    #[test]
    fn empty_peer_set_is_degenerate() {
        let stats = PeerSetStats::new(0, 0);
        assert!(stats.low_confidence);
        assert_eq!(stats.complete_fraction, 0.0);
    }

    #[test]
    fn score_accessors_flatten_missing_entries() {
        let scored = ScoredSecurity {
            ticker: "ACME".to_string(),
            metrics: SecurityMetrics::new("ACME"),
            metric_scores: BTreeMap::from([
                ("pe_forward".to_string(), Some(62.5)),
                ("ev_sales".to_string(), None),
            ]),
            category_scores: BTreeMap::from([(MetricCategory::Value, Some(62.5))]),
            total_score: Some(62.5),
            peer_stats: PeerSetStats::new(20, 20),
        };

        assert_eq!(scored.metric_score("pe_forward"), Some(62.5));
        assert_eq!(scored.metric_score("ev_sales"), None);
        assert_eq!(scored.metric_score("missing_entirely"), None);
        assert_eq!(scored.category_score(MetricCategory::Value), Some(62.5));
        assert_eq!(scored.category_score(MetricCategory::Risk), None);
    }
}
