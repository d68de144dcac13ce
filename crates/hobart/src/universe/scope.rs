//! Peer-set selection strategies.

use serde::{Deserialize, Serialize};

use hobart_factors::{MetricDef, SecurityMetrics};
use hobart_score::PeerSetStats;

use super::benchmark::BenchmarkWeights;

/// Which comparison group a security is ranked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeMode {
    /// Every security in the run with at least one populated metric.
    Universe,
    /// Constituents of the subject's assigned benchmark.
    BenchmarkScoped,
}

/// The resolved comparison group for one subject.
///
/// Borrowed from the run's security slice; resolved once per subject and
/// reused by every metric's percentile computation.
#[derive(Debug)]
pub struct PeerSet<'a> {
    /// Peer records, subject included when it qualifies.
    pub members: Vec<&'a SecurityMetrics>,
    /// Size/completeness stats for confidence reporting.
    pub stats: PeerSetStats,
}

impl<'a> PeerSet<'a> {
    /// Build a peer set and derive its stats.
    pub fn from_members(members: Vec<&'a SecurityMetrics>) -> Self {
        let complete = members.iter().filter(|m| m.is_complete()).count();
        let stats = PeerSetStats::new(members.len(), complete);
        Self { members, stats }
    }

    /// The peers' values for one metric, in member order.
    pub fn metric_values(&self, def: &MetricDef) -> Vec<Option<f64>> {
        self.members.iter().map(|m| (def.accessor)(m)).collect()
    }
}

/// Strategy for resolving a subject's peer set.
///
/// Injected into the scoring engine so the universe-vs-benchmark branch
/// lives here once instead of at every metric call site.
pub trait PeerScope {
    /// Resolve the peer set for `subject` out of the run's securities.
    fn peer_set<'a>(
        &self,
        subject: &SecurityMetrics,
        securities: &'a [SecurityMetrics],
    ) -> PeerSet<'a>;

    /// The mode this strategy implements, for reporting.
    fn mode(&self) -> ScopeMode;
}

/// Rank against the whole universe.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniverseScope;

impl PeerScope for UniverseScope {
    fn peer_set<'a>(
        &self,
        _subject: &SecurityMetrics,
        securities: &'a [SecurityMetrics],
    ) -> PeerSet<'a> {
        let members = securities.iter().filter(|s| s.has_any_metric()).collect();
        PeerSet::from_members(members)
    }

    fn mode(&self) -> ScopeMode {
        ScopeMode::Universe
    }
}

/// Rank against the constituents of the subject's assigned benchmark.
///
/// A subject with no benchmark assignment (no non-zero weight anywhere)
/// resolves to an empty peer set, which ranks every metric `None`.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkScope<'w> {
    weights: &'w BenchmarkWeights,
}

impl<'w> BenchmarkScope<'w> {
    /// Scope peer sets by the given constituent-weight table.
    pub const fn new(weights: &'w BenchmarkWeights) -> Self {
        Self { weights }
    }
}

impl PeerScope for BenchmarkScope<'_> {
    fn peer_set<'a>(
        &self,
        subject: &SecurityMetrics,
        securities: &'a [SecurityMetrics],
    ) -> PeerSet<'a> {
        let members = self
            .weights
            .assigned_benchmark(&subject.ticker)
            .map(|benchmark| {
                securities
                    .iter()
                    .filter(|s| self.weights.is_member(benchmark, &s.ticker))
                    .collect()
            })
            .unwrap_or_default();
        PeerSet::from_members(members)
    }

    fn mode(&self) -> ScopeMode {
        ScopeMode::BenchmarkScoped
    }
}
