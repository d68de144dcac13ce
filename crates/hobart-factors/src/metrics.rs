//! The fixed metric battery computed for each security.

use serde::{Deserialize, Serialize};

use crate::registry::available_metrics;

/// One security's extracted metric values, all independently nullable.
///
/// Built fresh per scoring run and never persisted. Value and risk metrics
/// are ratios in their natural units; momentum, surprise, and revision
/// metrics are percent (already multiplied by 100 at extraction).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecurityMetrics {
    /// Ticker symbol.
    pub ticker: String,

    // Value
    /// Forward (NTM) price-to-earnings ratio.
    pub pe_forward: Option<f64>,
    /// Trailing (TTM) price-to-earnings ratio.
    pub pe_trailing: Option<f64>,
    /// Enterprise value / EBITDA.
    pub ev_ebitda: Option<f64>,
    /// Enterprise value / sales.
    pub ev_sales: Option<f64>,
    /// Upside to the consensus target price, percent.
    pub target_upside: Option<f64>,

    // Momentum
    /// One-week price return, percent.
    pub return_1w: Option<f64>,
    /// One-month price return, percent.
    pub return_1m: Option<f64>,
    /// Three-month price return, percent.
    pub return_3m: Option<f64>,
    /// One-year price return, percent.
    pub return_1y: Option<f64>,
    /// Quarter-to-date price return, percent.
    pub return_qtd: Option<f64>,
    /// Year-to-date price return, percent.
    pub return_ytd: Option<f64>,
    /// Last close as a percentage of the 52-week high.
    pub high_52w_proximity: Option<f64>,
    /// 90-day change in the NTM EPS estimate, percent.
    pub eps_revision: Option<f64>,
    /// 90-day change in the NTM revenue estimate, percent.
    pub revenue_revision: Option<f64>,
    /// Last-quarter EPS surprise, percent.
    pub eps_surprise: Option<f64>,
    /// Last-quarter revenue surprise, percent.
    pub revenue_surprise: Option<f64>,

    // Quality
    /// Return on invested capital, trailing 1 year.
    pub roic_1y: Option<f64>,
    /// Return on invested capital, trailing 3 years.
    pub roic_3y: Option<f64>,
    /// Gross profit over total assets.
    pub gross_profit_to_assets: Option<f64>,
    /// Free cash flow over total assets.
    pub fcf_to_assets: Option<f64>,
    /// Accruals as a percentage of assets (lower is cleaner earnings).
    pub accruals_pct: Option<f64>,

    // Risk
    /// Raw provider 1-year beta.
    pub beta: Option<f64>,
    /// Realized 30-day volatility.
    pub volatility_30d: Option<f64>,
    /// Net debt over EBITDA.
    pub net_debt_to_ebitda: Option<f64>,
}

impl SecurityMetrics {
    /// Create an empty metric set for a ticker.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    /// Look up a metric value by registry name.
    pub fn get(&self, name: &str) -> Option<f64> {
        available_metrics()
            .iter()
            .find(|def| def.name == name)
            .and_then(|def| (def.accessor)(self))
    }

    /// Whether at least one metric in the battery is populated.
    ///
    /// Securities failing this test carry no rankable information and are
    /// excluded from universe-scoped peer sets.
    pub fn has_any_metric(&self) -> bool {
        available_metrics()
            .iter()
            .any(|def| (def.accessor)(self).is_some())
    }

    /// Whether every metric in the battery is populated.
    pub fn is_complete(&self) -> bool {
        available_metrics()
            .iter()
            .all(|def| (def.accessor)(self).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_metric_set_has_no_metrics() {
        let metrics = SecurityMetrics::new("ACME");
        assert!(!metrics.has_any_metric());
        assert!(!metrics.is_complete());
    }

    #[test]
    fn single_populated_field_counts() {
        let metrics = SecurityMetrics {
            roic_1y: Some(0.14),
            ..SecurityMetrics::new("ACME")
        };
        assert!(metrics.has_any_metric());
        assert!(!metrics.is_complete());
        assert_eq!(metrics.get("roic_1y"), Some(0.14));
    }

    #[test]
    fn get_unknown_metric_is_none() {
        let metrics = SecurityMetrics {
            pe_forward: Some(12.0),
            ..SecurityMetrics::new("ACME")
        };
        assert_eq!(metrics.get("not_a_metric"), None);
    }
}
