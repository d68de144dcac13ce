//! Raw provider inputs: fundamental/estimate snapshots and close-price history.
//!
//! These are the shapes the external data layer hands to the scoring core.
//! Every numeric field is independently nullable, and deserialization is
//! lenient: a malformed field becomes `None` rather than failing the record.

use serde::{Deserialize, Deserializer, Serialize};

/// Per-ticker fundamental and estimate snapshot as supplied by the provider.
///
/// Ratio fields (`pe_forward`, `ev_ebitda`, ...) arrive already computed.
/// Surprise and estimate fields are raw fractions; the extractor converts
/// them to percent exactly once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundamentalSnapshot {
    /// Ticker symbol.
    pub ticker: String,

    /// Forward (NTM) price-to-earnings ratio.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pe_forward: Option<f64>,
    /// Trailing (TTM) price-to-earnings ratio.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub pe_trailing: Option<f64>,
    /// Enterprise value / EBITDA.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ev_ebitda: Option<f64>,
    /// Enterprise value / sales.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ev_sales: Option<f64>,

    /// Consensus NTM EPS estimate, current.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub eps_ntm: Option<f64>,
    /// Consensus NTM EPS estimate, 90 days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub eps_ntm_90d_ago: Option<f64>,
    /// Consensus NTM revenue estimate, current.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub revenue_ntm: Option<f64>,
    /// Consensus NTM revenue estimate, 90 days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub revenue_ntm_90d_ago: Option<f64>,

    /// Last-quarter EPS surprise, as a fraction of the estimate.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub eps_surprise: Option<f64>,
    /// Last-quarter revenue surprise, as a fraction of the estimate.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub revenue_surprise: Option<f64>,

    /// Return on invested capital, trailing 1 year.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roic_1y: Option<f64>,
    /// Return on invested capital, trailing 3 years.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub roic_3y: Option<f64>,
    /// Gross profit, trailing twelve months.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub gross_profit: Option<f64>,
    /// Total assets, most recent balance sheet.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_assets: Option<f64>,
    /// Free cash flow, trailing twelve months.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub free_cash_flow: Option<f64>,
    /// Accruals as a percentage of assets.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub accruals_pct: Option<f64>,

    /// Provider beta, 1-year horizon.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub beta_1y: Option<f64>,
    /// Provider beta, 3-year horizon.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub beta_3y: Option<f64>,
    /// Provider beta, 5-year horizon.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub beta_5y: Option<f64>,
    /// Realized volatility over a short (30-day) window.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub volatility_30d: Option<f64>,

    /// 52-week high close.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub high_52w: Option<f64>,
    /// Consensus target price.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub target_price: Option<f64>,
    /// Net debt (total debt less cash).
    #[serde(default, deserialize_with = "lenient_f64")]
    pub net_debt: Option<f64>,
    /// EBITDA, trailing twelve months.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub ebitda: Option<f64>,
}

/// Historical close prices at the fixed offsets the extractor consumes.
///
/// Offsets are in calendar days except `close_1w`, which is five trading
/// days. Any close the provider could not resolve is `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceHistory {
    /// Most recent close.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub last: Option<f64>,
    /// Close one day prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_1d: Option<f64>,
    /// Close five trading days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_1w: Option<f64>,
    /// Close 30 days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_1m: Option<f64>,
    /// Close 90 days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_3m: Option<f64>,
    /// Close 365 days prior.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub close_1y: Option<f64>,
    /// Close at the end of the last completed quarter.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub prior_quarter_close: Option<f64>,
    /// Close at the end of the last completed year.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub prior_year_close: Option<f64>,
}

/// Accept a number, a numeric string, or anything else as `Option<f64>`.
///
/// Provider feeds interleave numbers with `"N/A"`, `"--"`, empty strings,
/// and occasional non-finite values; all of those become `None`.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
        Other(serde_json::Value),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Num(n)) if n.is_finite() => Some(n),
        Some(Raw::Num(_)) => None,
        Some(Raw::Text(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(Raw::Other(_)) => None,
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_deserializes_sparse_record() {
        let json = r#"{"ticker": "ACME", "pe_forward": 14.2, "ebitda": 250.0}"#;
        let snap: FundamentalSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snap.ticker, "ACME");
        assert_eq!(snap.pe_forward, Some(14.2));
        assert_eq!(snap.ebitda, Some(250.0));
        assert_eq!(snap.pe_trailing, None);
        assert_eq!(snap.beta_1y, None);
    }

    #[test]
    fn lenient_fields_accept_numeric_strings() {
        let json = r#"{"ticker": "ACME", "pe_forward": "18.5", "ev_sales": " 3.1 "}"#;
        let snap: FundamentalSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snap.pe_forward, Some(18.5));
        assert_eq!(snap.ev_sales, Some(3.1));
    }

    #[test]
    fn lenient_fields_null_out_garbage() {
        let json = r#"{
            "ticker": "ACME",
            "pe_forward": "N/A",
            "pe_trailing": "--",
            "ev_ebitda": null,
            "ev_sales": {"oops": true},
            "eps_surprise": ""
        }"#;
        let snap: FundamentalSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snap.pe_forward, None);
        assert_eq!(snap.pe_trailing, None);
        assert_eq!(snap.ev_ebitda, None);
        assert_eq!(snap.ev_sales, None);
        assert_eq!(snap.eps_surprise, None);
    }

    #[test]
    fn price_history_defaults_to_all_none() {
        let prices: PriceHistory = serde_json::from_str("{}").unwrap();
        assert_eq!(prices, PriceHistory::default());
        assert_eq!(prices.last, None);
    }
}
