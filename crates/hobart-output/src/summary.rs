//! Risk summary rendering.
//!
//! Wraps a [`RiskMetricsResult`] with its identifying context (fund or
//! portfolio name, window dates) for terminal and Markdown display. The
//! statistics arrive already computed and already scaled to percent;
//! rendering never recomputes them.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use hobart_risk::RiskMetricsResult;

/// Risk summary for one NAV window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    /// Entity name (fund, portfolio, or model name).
    pub name: String,

    /// First date of the NAV window, when known.
    pub period_start: Option<NaiveDate>,

    /// Last date of the NAV window, when known.
    pub period_end: Option<NaiveDate>,

    /// The computed statistics and day counters.
    pub metrics: RiskMetricsResult,
}

impl RiskSummary {
    /// Create a new risk summary.
    pub fn new(
        name: impl Into<String>,
        period_start: Option<NaiveDate>,
        period_end: Option<NaiveDate>,
        metrics: RiskMetricsResult,
    ) -> Self {
        Self {
            name: name.into(),
            period_start,
            period_end,
            metrics,
        }
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nRisk Summary: {}\n", self.name));
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            output.push_str(&format!("Period: {} to {}\n", start, end));
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.metrics.has_statistics() {
            output.push_str(&format!(
                "  Sharpe Ratio:             {}\n",
                fmt_stat(self.metrics.sharpe_ratio, "")
            ));
            output.push_str(&format!(
                "  Annualized Volatility:    {}\n",
                fmt_stat(self.metrics.annualized_volatility, "%")
            ));
            output.push_str(&format!(
                "  95% VaR (daily):          {}\n",
                fmt_stat(self.metrics.var_95, "%")
            ));
            output.push_str(&format!(
                "  Max Drawdown:             {}\n",
                fmt_stat(self.metrics.max_drawdown, "%")
            ));
            output.push_str(&format!(
                "  Days of Data:             {}\n",
                self.metrics.days_of_data
            ));
        } else {
            output.push_str(&format!(
                "  Insufficient history: {} of {} required days\n",
                self.metrics.days_of_data, self.metrics.requires_days
            ));
        }

        output.push_str(&"=".repeat(60));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Risk Summary: {}\n\n", self.name));
        if let (Some(start), Some(end)) = (self.period_start, self.period_end) {
            output.push_str(&format!("**Period:** {} to {}\n\n", start, end));
        }

        if self.metrics.has_statistics() {
            output.push_str(&format!(
                "- **Sharpe Ratio:** {}\n",
                fmt_stat(self.metrics.sharpe_ratio, "")
            ));
            output.push_str(&format!(
                "- **Annualized Volatility:** {}\n",
                fmt_stat(self.metrics.annualized_volatility, "%")
            ));
            output.push_str(&format!(
                "- **95% VaR (daily):** {}\n",
                fmt_stat(self.metrics.var_95, "%")
            ));
            output.push_str(&format!(
                "- **Max Drawdown:** {}\n",
                fmt_stat(self.metrics.max_drawdown, "%")
            ));
            output.push_str(&format!(
                "- **Days of Data:** {}\n",
                self.metrics.days_of_data
            ));
        } else {
            output.push_str(&format!(
                "Insufficient history: {} of {} required days.\n",
                self.metrics.days_of_data, self.metrics.requires_days
            ));
        }

        output
    }
}

impl fmt::Display for RiskSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Risk Summary: {}", self.name)?;
        if self.metrics.has_statistics() {
            writeln!(f, "  Sharpe: {}", fmt_stat(self.metrics.sharpe_ratio, ""))?;
            writeln!(
                f,
                "  Volatility: {}",
                fmt_stat(self.metrics.annualized_volatility, "%")
            )?;
            writeln!(f, "  VaR 95: {}", fmt_stat(self.metrics.var_95, "%"))?;
            writeln!(f, "  Max Drawdown: {}", fmt_stat(self.metrics.max_drawdown, "%"))?;
        } else {
            writeln!(
                f,
                "  Insufficient history ({} of {} days)",
                self.metrics.days_of_data, self.metrics.requires_days
            )?;
        }
        Ok(())
    }
}

fn fmt_stat(value: Option<f64>, unit: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}{}", v, unit))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> RiskMetricsResult {
        RiskMetricsResult {
            sharpe_ratio: Some(1.12),
            annualized_volatility: Some(14.25),
            var_95: Some(-1.43),
            max_drawdown: Some(-8.31),
            days_of_data: 90,
            requires_days: 30,
        }
    }

    fn insufficient() -> RiskMetricsResult {
        RiskMetricsResult {
            sharpe_ratio: None,
            annualized_volatility: None,
            var_95: None,
            max_drawdown: None,
            days_of_data: 20,
            requires_days: 30,
        }
    }

    #[test]
    fn ascii_table_shows_statistics() {
        let summary = RiskSummary::new(
            "Growth Fund",
            NaiveDate::from_ymd_opt(2024, 1, 2),
            NaiveDate::from_ymd_opt(2024, 5, 10),
            metrics(),
        );
        let table = summary.to_ascii_table();

        assert!(table.contains("Growth Fund"));
        assert!(table.contains("2024-01-02 to 2024-05-10"));
        assert!(table.contains("1.12"));
        assert!(table.contains("14.25%"));
        assert!(table.contains("-8.31%"));
    }

    #[test]
    fn insufficient_history_renders_counters_not_dashes() {
        let summary = RiskSummary::new("Young Fund", None, None, insufficient());
        let table = summary.to_ascii_table();

        assert!(table.contains("Insufficient history: 20 of 30 required days"));
        assert!(!table.contains("Sharpe Ratio"));
    }

    #[test]
    fn markdown_renders_both_states() {
        let full = RiskSummary::new("Growth Fund", None, None, metrics());
        let md = full.to_markdown();
        assert!(md.contains("# Risk Summary: Growth Fund"));
        assert!(md.contains("**Sharpe Ratio:** 1.12"));

        let short = RiskSummary::new("Young Fund", None, None, insufficient());
        let md = short.to_markdown();
        assert!(md.contains("Insufficient history: 20 of 30"));
    }

    #[test]
    fn display_is_compact() {
        let summary = RiskSummary::new("Growth Fund", None, None, metrics());
        let display = format!("{}", summary);
        assert!(display.contains("Risk Summary: Growth Fund"));
        assert!(display.contains("Sharpe: 1.12"));
    }
}
