//! True-beta resolution.
//!
//! Providers rarely deliver betas for every horizon, so the resolver fills
//! gaps with an explicit, ordered fallback table: the shortest available
//! horizon propagates to longer missing ones, never the reverse. Anything
//! still missing afterwards defaults to 1 (market-neutral). Each horizon is
//! capped at 3 before combining, and the published true beta is the maximum
//! across horizons, optionally floored by the resolved beta of a reference
//! index the security trades within.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Default assumed beta for a horizon with no data anywhere in the cascade.
pub const DEFAULT_BETA: f64 = 1.0;
/// Per-horizon cap applied before combining into the true beta.
pub const BETA_CAP: f64 = 3.0;

/// Beta horizons, shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizon {
    OneYear,
    ThreeYear,
    FiveYear,
}

/// Fallback rules in application order: `(target, source)` pairs, where a
/// missing target horizon is filled from the source if the source is
/// present (raw or already backfilled by an earlier rule).
const FALLBACK_RULES: [(Horizon, Horizon); 3] = [
    (Horizon::ThreeYear, Horizon::OneYear),
    (Horizon::FiveYear, Horizon::ThreeYear),
    (Horizon::FiveYear, Horizon::OneYear),
];

/// Raw provider betas per horizon, each independently nullable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBetas {
    /// 1-year beta.
    pub one_year: Option<f64>,
    /// 3-year beta.
    pub three_year: Option<f64>,
    /// 5-year beta.
    pub five_year: Option<f64>,
}

impl RawBetas {
    fn get(&self, horizon: Horizon) -> Option<f64> {
        match horizon {
            Horizon::OneYear => self.one_year,
            Horizon::ThreeYear => self.three_year,
            Horizon::FiveYear => self.five_year,
        }
    }

    fn set(&mut self, horizon: Horizon, value: f64) {
        match horizon {
            Horizon::OneYear => self.one_year = Some(value),
            Horizon::ThreeYear => self.three_year = Some(value),
            Horizon::FiveYear => self.five_year = Some(value),
        }
    }
}

/// Fully-resolved betas: every horizon populated, plus the true beta.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedBetas {
    /// Resolved 1-year beta (uncapped).
    pub beta_1y: f64,
    /// Resolved 3-year beta (uncapped).
    pub beta_3y: f64,
    /// Resolved 5-year beta (uncapped).
    pub beta_5y: f64,
    /// Conservative market sensitivity: max of the capped horizons, floored
    /// by a reference index's true beta when one applies.
    pub true_beta: f64,
}

/// Tickers treated as cash equivalents, pinned to beta 0.
///
/// Matching is by exact (case-insensitive) ticker or by suffix; money-market
/// fund tickers conventionally end in "XX".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashEquivalents {
    /// Exact ticker matches.
    pub tickers: BTreeSet<String>,
    /// Ticker suffix matches.
    pub suffixes: Vec<String>,
}

impl CashEquivalents {
    /// Whether a ticker is a cash equivalent.
    pub fn is_cash(&self, ticker: &str) -> bool {
        let ticker = ticker.to_uppercase();
        self.tickers.contains(&ticker) || self.suffixes.iter().any(|s| ticker.ends_with(s))
    }
}

impl Default for CashEquivalents {
    fn default() -> Self {
        Self {
            tickers: BTreeSet::from(["CASH".to_string(), "USD".to_string()]),
            suffixes: vec!["XX".to_string()],
        }
    }
}

/// Resolve the effective betas for one security.
///
/// Cash equivalents skip the cascade entirely and pin every horizon and the
/// true beta to 0. Pass `reference_index` when the security carries
/// non-zero weight in an index whose own resolved betas are known; a
/// constituent's market sensitivity is floored by the basket it trades
/// within.
pub fn resolve_betas(
    ticker: &str,
    raw: RawBetas,
    reference_index: Option<&ResolvedBetas>,
    cash: &CashEquivalents,
) -> ResolvedBetas {
    if cash.is_cash(ticker) {
        return ResolvedBetas {
            beta_1y: 0.0,
            beta_3y: 0.0,
            beta_5y: 0.0,
            true_beta: 0.0,
        };
    }

    let mut resolved = raw;
    for (target, source) in FALLBACK_RULES {
        if resolved.get(target).is_none()
            && let Some(value) = resolved.get(source)
        {
            resolved.set(target, value);
        }
    }

    let beta_1y = resolved.one_year.unwrap_or(DEFAULT_BETA);
    let beta_3y = resolved.three_year.unwrap_or(DEFAULT_BETA);
    let beta_5y = resolved.five_year.unwrap_or(DEFAULT_BETA);

    let mut true_beta = beta_1y
        .min(BETA_CAP)
        .max(beta_3y.min(BETA_CAP))
        .max(beta_5y.min(BETA_CAP));

    if let Some(index) = reference_index {
        true_beta = true_beta.max(index.true_beta);
    }

    ResolvedBetas {
        beta_1y,
        beta_3y,
        beta_5y,
        true_beta,
    }
}
