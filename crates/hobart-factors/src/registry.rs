//! Metric registry.
//!
//! Central catalogue of every metric in the battery: its category, the
//! direction in which larger values are better, and an accessor into
//! [`SecurityMetrics`]. Scoring and reporting both drive off this table, so
//! adding a metric is a one-line change here plus its extraction rule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::metrics::SecurityMetrics;

/// Factor categories a metric can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    /// Valuation metrics (earnings and enterprise-value multiples).
    Value,
    /// Price and estimate momentum metrics.
    Momentum,
    /// Profitability and earnings-quality metrics.
    Quality,
    /// Market-risk and leverage metrics.
    Risk,
}

impl MetricCategory {
    /// All categories, in reporting order.
    pub const fn all() -> [Self; 4] {
        [Self::Value, Self::Momentum, Self::Quality, Self::Risk]
    }
}

impl std::fmt::Display for MetricCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value => write!(f, "value"),
            Self::Momentum => write!(f, "momentum"),
            Self::Quality => write!(f, "quality"),
            Self::Risk => write!(f, "risk"),
        }
    }
}

/// Ranking direction for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Larger values rank better (returns, ROIC).
    HigherIsBetter,
    /// Smaller values rank better (multiples, volatility, leverage).
    LowerIsBetter,
}

/// Registry entry for one metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricDef {
    /// Metric name (unique identifier, also the weight-profile key).
    pub name: &'static str,
    /// Category the metric contributes to.
    pub category: MetricCategory,
    /// Ranking direction.
    pub direction: Direction,
    /// Brief description of what the metric measures.
    pub description: &'static str,
    /// Accessor into a [`SecurityMetrics`] record.
    pub accessor: fn(&SecurityMetrics) -> Option<f64>,
}

/// Registry lookup failures.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A weight profile referenced a metric that does not exist.
    #[error("unknown metric: {0}")]
    UnknownMetric(String),
}

/// The full metric battery, in category order.
pub fn available_metrics() -> &'static [MetricDef] {
    use Direction::*;
    use MetricCategory::*;

    static METRICS: &[MetricDef] = &[
        // Value
        MetricDef {
            name: "pe_forward",
            category: Value,
            direction: LowerIsBetter,
            description: "Forward (NTM) price-to-earnings ratio",
            accessor: |m| m.pe_forward,
        },
        MetricDef {
            name: "pe_trailing",
            category: Value,
            direction: LowerIsBetter,
            description: "Trailing (TTM) price-to-earnings ratio",
            accessor: |m| m.pe_trailing,
        },
        MetricDef {
            name: "ev_ebitda",
            category: Value,
            direction: LowerIsBetter,
            description: "Enterprise value to EBITDA",
            accessor: |m| m.ev_ebitda,
        },
        MetricDef {
            name: "ev_sales",
            category: Value,
            direction: LowerIsBetter,
            description: "Enterprise value to sales",
            accessor: |m| m.ev_sales,
        },
        MetricDef {
            name: "target_upside",
            category: Value,
            direction: HigherIsBetter,
            description: "Upside to consensus target price (%)",
            accessor: |m| m.target_upside,
        },
        // Momentum
        MetricDef {
            name: "return_1w",
            category: Momentum,
            direction: HigherIsBetter,
            description: "One-week price return (%)",
            accessor: |m| m.return_1w,
        },
        MetricDef {
            name: "return_1m",
            category: Momentum,
            direction: HigherIsBetter,
            description: "One-month price return (%)",
            accessor: |m| m.return_1m,
        },
        MetricDef {
            name: "return_3m",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Three-month price return (%)",
            accessor: |m| m.return_3m,
        },
        MetricDef {
            name: "return_1y",
            category: Momentum,
            direction: HigherIsBetter,
            description: "One-year price return (%)",
            accessor: |m| m.return_1y,
        },
        MetricDef {
            name: "return_qtd",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Quarter-to-date price return (%)",
            accessor: |m| m.return_qtd,
        },
        MetricDef {
            name: "return_ytd",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Year-to-date price return (%)",
            accessor: |m| m.return_ytd,
        },
        MetricDef {
            name: "high_52w_proximity",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Last close as a percentage of the 52-week high",
            accessor: |m| m.high_52w_proximity,
        },
        MetricDef {
            name: "eps_revision",
            category: Momentum,
            direction: HigherIsBetter,
            description: "90-day NTM EPS estimate revision (%)",
            accessor: |m| m.eps_revision,
        },
        MetricDef {
            name: "revenue_revision",
            category: Momentum,
            direction: HigherIsBetter,
            description: "90-day NTM revenue estimate revision (%)",
            accessor: |m| m.revenue_revision,
        },
        MetricDef {
            name: "eps_surprise",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Last-quarter EPS surprise (%)",
            accessor: |m| m.eps_surprise,
        },
        MetricDef {
            name: "revenue_surprise",
            category: Momentum,
            direction: HigherIsBetter,
            description: "Last-quarter revenue surprise (%)",
            accessor: |m| m.revenue_surprise,
        },
        // Quality
        MetricDef {
            name: "roic_1y",
            category: Quality,
            direction: HigherIsBetter,
            description: "Return on invested capital, 1-year",
            accessor: |m| m.roic_1y,
        },
        MetricDef {
            name: "roic_3y",
            category: Quality,
            direction: HigherIsBetter,
            description: "Return on invested capital, 3-year",
            accessor: |m| m.roic_3y,
        },
        MetricDef {
            name: "gross_profit_to_assets",
            category: Quality,
            direction: HigherIsBetter,
            description: "Gross profit over total assets",
            accessor: |m| m.gross_profit_to_assets,
        },
        MetricDef {
            name: "fcf_to_assets",
            category: Quality,
            direction: HigherIsBetter,
            description: "Free cash flow over total assets",
            accessor: |m| m.fcf_to_assets,
        },
        MetricDef {
            name: "accruals_pct",
            category: Quality,
            direction: LowerIsBetter,
            description: "Accruals as a percentage of assets",
            accessor: |m| m.accruals_pct,
        },
        // Risk
        MetricDef {
            name: "beta",
            category: Risk,
            direction: LowerIsBetter,
            description: "Raw provider 1-year beta",
            accessor: |m| m.beta,
        },
        MetricDef {
            name: "volatility_30d",
            category: Risk,
            direction: LowerIsBetter,
            description: "Realized 30-day volatility",
            accessor: |m| m.volatility_30d,
        },
        MetricDef {
            name: "net_debt_to_ebitda",
            category: Risk,
            direction: LowerIsBetter,
            description: "Net debt over EBITDA",
            accessor: |m| m.net_debt_to_ebitda,
        },
    ];

    METRICS
}

/// Get metrics belonging to one category, in registry order.
pub fn metrics_in_category(category: MetricCategory) -> Vec<&'static MetricDef> {
    available_metrics()
        .iter()
        .filter(|def| def.category == category)
        .collect()
}

/// Look up a metric definition by name.
pub fn get_metric(name: &str) -> Result<&'static MetricDef, RegistryError> {
    available_metrics()
        .iter()
        .find(|def| def.name == name)
        .ok_or_else(|| RegistryError::UnknownMetric(name.to_string()))
}

/// Count metrics per category.
pub fn count_by_category() -> HashMap<MetricCategory, usize> {
    let mut counts = HashMap::new();
    for def in available_metrics() {
        *counts.entry(def.category).or_insert(0) += 1;
    }
    counts
}
