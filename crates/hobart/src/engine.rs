//! The scoring pipeline.
//!
//! For each security: resolve the peer set once, percentile-rank every
//! metric in the registry against it, then roll metric scores up into
//! category composites and a total score under the active weight profile.
//! Securities are independent given the read-only peer slice, so the run
//! fans out one task per security.

use std::collections::BTreeMap;

use rayon::prelude::*;

use hobart_factors::{MetricCategory, SecurityMetrics, metrics_in_category};
use hobart_score::{ScoreError, ScoreWeightProfile, ScoredSecurity, percentile_rank, weighted_average};

use crate::universe::PeerScope;

/// Scores a universe of securities under one weight profile and one
/// peer-scope strategy.
///
/// Holds no mutable state; the same engine may serve concurrent runs.
#[derive(Debug)]
pub struct ScoringEngine<S> {
    profile: ScoreWeightProfile,
    scope: S,
}

impl<S: PeerScope + Sync> ScoringEngine<S> {
    /// Create an engine from a weight profile and a scope strategy.
    pub const fn new(profile: ScoreWeightProfile, scope: S) -> Self {
        Self { profile, scope }
    }

    /// The active weight profile.
    pub const fn profile(&self) -> &ScoreWeightProfile {
        &self.profile
    }

    /// Score every security in the slice, in parallel.
    ///
    /// Input order is preserved in the output.
    pub fn score_universe(
        &self,
        securities: &[SecurityMetrics],
    ) -> Result<Vec<ScoredSecurity>, ScoreError> {
        securities
            .par_iter()
            .map(|subject| self.score_security(subject, securities))
            .collect()
    }

    /// Score a single security against the run's securities.
    pub fn score_security(
        &self,
        subject: &SecurityMetrics,
        securities: &[SecurityMetrics],
    ) -> Result<ScoredSecurity, ScoreError> {
        // One peer set per subject, shared by every metric below.
        let peers = self.scope.peer_set(subject, securities);

        let mut metric_scores = BTreeMap::new();
        let mut category_scores = BTreeMap::new();

        for category in MetricCategory::all() {
            let defs = metrics_in_category(category);
            let mut scores = Vec::with_capacity(defs.len());
            let mut weights = Vec::with_capacity(defs.len());

            for def in defs {
                let values = peers.metric_values(def);
                let score = percentile_rank((def.accessor)(subject), &values, def.direction);

                metric_scores.insert(def.name.to_string(), score);
                scores.push(score);
                weights.push(self.profile.metric_weight(category, def.name));
            }

            category_scores.insert(category, weighted_average(&scores, &weights)?);
        }

        let categories = MetricCategory::all();
        let composites: Vec<Option<f64>> =
            categories.iter().map(|c| category_scores[c]).collect();
        let category_weights: Vec<f64> = categories
            .iter()
            .map(|c| self.profile.category_weight(*c))
            .collect();
        let total_score = weighted_average(&composites, &category_weights)?;

        Ok(ScoredSecurity {
            ticker: subject.ticker.clone(),
            metrics: subject.clone(),
            metric_scores,
            category_scores,
            total_score,
            peer_stats: peers.stats,
        })
    }
}
