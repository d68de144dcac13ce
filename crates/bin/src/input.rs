//! Input file loading for the CLI.
//!
//! The scoring input is a JSON bundle of per-security snapshots with their
//! price histories plus optional benchmark constituent weights. NAV series
//! and raw betas arrive as CSV, the formats the surrounding sync jobs
//! produce.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use hobart::universe::BenchmarkWeights;
use hobart_factors::{FundamentalSnapshot, PriceHistory, SecurityMetrics, extract_metrics};
use hobart_risk::{NavSnapshot, RawBetas};

/// One security's raw inputs in the scoring bundle.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SecurityInput {
    /// Fundamental/estimate snapshot fields, inlined.
    #[serde(flatten)]
    pub snapshot: FundamentalSnapshot,
    /// Close-price history at the fixed offsets.
    #[serde(default)]
    pub prices: PriceHistory,
}

/// The scoring bundle: securities plus benchmark weights.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ScoreInput {
    /// Securities to score.
    pub securities: Vec<SecurityInput>,
    /// Benchmark constituent weights, `benchmark -> ticker -> weight`.
    #[serde(default)]
    pub benchmarks: BenchmarkWeights,
}

impl ScoreInput {
    /// Load a bundle from a JSON file.
    pub(crate) fn from_path(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Extract the metric battery for every security in the bundle.
    pub(crate) fn extract_all(&self) -> Vec<SecurityMetrics> {
        self.securities
            .iter()
            .map(|s| extract_metrics(&s.snapshot, &s.prices))
            .collect()
    }
}

/// One NAV CSV row: `date,nav`.
#[derive(Debug, Deserialize)]
struct NavRow {
    date: NaiveDate,
    nav: f64,
}

/// Load a NAV series from CSV.
pub(crate) fn load_nav_series(path: &Path) -> Result<Vec<NavSnapshot>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut snapshots = Vec::new();
    for row in reader.deserialize() {
        let row: NavRow = row?;
        snapshots.push(NavSnapshot {
            date: row.date,
            nav: row.nav,
        });
    }
    Ok(snapshots)
}

/// One raw-beta CSV row. Empty beta cells mean the provider had no
/// estimate for that horizon; `index_weight` is the security's weight in
/// the reference index, when it is a constituent.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BetaRow {
    /// Ticker symbol.
    pub ticker: String,
    /// Raw 1-year beta.
    #[serde(default)]
    pub beta_1y: Option<f64>,
    /// Raw 3-year beta.
    #[serde(default)]
    pub beta_3y: Option<f64>,
    /// Raw 5-year beta.
    #[serde(default)]
    pub beta_5y: Option<f64>,
    /// Weight in the reference index, if any.
    #[serde(default)]
    pub index_weight: Option<f64>,
}

impl BetaRow {
    /// The raw provider betas for this row.
    pub(crate) const fn raw(&self) -> RawBetas {
        RawBetas {
            one_year: self.beta_1y,
            three_year: self.beta_3y,
            five_year: self.beta_5y,
        }
    }

    /// Whether the row is a constituent of the reference index.
    pub(crate) fn in_reference_index(&self) -> bool {
        self.index_weight.is_some_and(|w| w != 0.0)
    }
}

/// Load raw beta rows from CSV.
pub(crate) fn load_beta_rows(path: &Path) -> Result<Vec<BetaRow>, Box<dyn std::error::Error>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_input_parses_flattened_snapshots() {
        let json = r#"{
            "securities": [
                {
                    "ticker": "ACME",
                    "pe_forward": 14.0,
                    "prices": {"last": 100.0, "close_1m": 90.0}
                }
            ],
            "benchmarks": {"GROWTH100": {"ACME": 0.05}}
        }"#;

        let input: ScoreInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.securities.len(), 1);
        assert_eq!(input.securities[0].snapshot.pe_forward, Some(14.0));

        let metrics = input.extract_all();
        assert_eq!(metrics[0].ticker, "ACME");
        assert!(metrics[0].return_1m.is_some());
        assert!(input.benchmarks.is_member("GROWTH100", "ACME"));
    }

    #[test]
    fn beta_row_membership_is_a_weight_predicate() {
        let row = BetaRow {
            ticker: "ACME".to_string(),
            beta_1y: Some(1.2),
            beta_3y: None,
            beta_5y: None,
            index_weight: Some(0.0),
        };
        assert!(!row.in_reference_index());
        assert_eq!(row.raw().one_year, Some(1.2));
    }
}
