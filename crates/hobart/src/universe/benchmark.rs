//! Benchmark constituent weights.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Constituent weights per benchmark: `benchmark id -> ticker -> weight`.
///
/// Membership is a weight predicate, not a name match: a ticker belongs to
/// a benchmark exactly when it carries a non-zero weight there. The table
/// is read-only for the duration of a scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkWeights {
    weights: BTreeMap<String, BTreeMap<String, f64>>,
}

impl BenchmarkWeights {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a ticker's weight in a benchmark.
    pub fn insert(
        &mut self,
        benchmark: impl Into<String>,
        ticker: impl Into<String>,
        weight: f64,
    ) {
        self.weights
            .entry(benchmark.into())
            .or_default()
            .insert(ticker.into(), weight);
    }

    /// A ticker's weight in a benchmark, if recorded.
    pub fn weight(&self, benchmark: &str, ticker: &str) -> Option<f64> {
        self.weights.get(benchmark).and_then(|w| w.get(ticker)).copied()
    }

    /// Whether a ticker is a constituent of a benchmark (non-zero weight).
    pub fn is_member(&self, benchmark: &str, ticker: &str) -> bool {
        self.weight(benchmark, ticker).is_some_and(|w| w != 0.0)
    }

    /// The benchmark a ticker is assigned to: the first benchmark (in id
    /// order, so deterministic) in which it carries non-zero weight.
    pub fn assigned_benchmark(&self, ticker: &str) -> Option<&str> {
        self.weights
            .iter()
            .find(|(_, members)| members.get(ticker).is_some_and(|w| *w != 0.0))
            .map(|(benchmark, _)| benchmark.as_str())
    }

    /// Constituent tickers of a benchmark (non-zero weight only).
    pub fn members(&self, benchmark: &str) -> Vec<&str> {
        self.weights
            .get(benchmark)
            .map(|members| {
                members
                    .iter()
                    .filter(|(_, w)| **w != 0.0)
                    .map(|(ticker, _)| ticker.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// All benchmark ids in the table.
    pub fn benchmarks(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }
}
