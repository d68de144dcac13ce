//! Scoreboard rendering for a scored universe.

use std::fmt;

use serde::{Deserialize, Serialize};

use hobart_factors::MetricCategory;
use hobart_score::ScoredSecurity;

/// A ranked scoreboard over one scoring run.
///
/// Securities are ordered by total score descending, with unscored
/// securities last; rendering never re-ranks or recomputes anything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreboardReport {
    /// Report title (profile or run name).
    pub title: String,
    /// Scored securities, ranked.
    pub entries: Vec<ScoredSecurity>,
}

impl ScoreboardReport {
    /// Build a report from a scoring run, ranking by total score.
    pub fn new(title: impl Into<String>, mut entries: Vec<ScoredSecurity>) -> Self {
        entries.sort_by(|a, b| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self {
            title: title.into(),
            entries,
        }
    }

    /// The top `n` entries.
    pub fn top(&self, n: usize) -> &[ScoredSecurity] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Format as ASCII table for terminal display.
    pub fn to_ascii_table(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("\nScoreboard: {}\n", self.title));
        output.push_str(&"=".repeat(78));
        output.push('\n');
        output.push_str(&format!(
            "{:<8} {:>7} {:>7} {:>9} {:>8} {:>6} {:>6} {:>5}\n",
            "Ticker", "Total", "Value", "Momentum", "Quality", "Risk", "Peers", "Conf"
        ));
        output.push_str(&"-".repeat(78));
        output.push('\n');

        for entry in &self.entries {
            output.push_str(&format!(
                "{:<8} {:>7} {:>7} {:>9} {:>8} {:>6} {:>6} {:>5}\n",
                entry.ticker,
                fmt_score(entry.total_score),
                fmt_score(entry.category_score(MetricCategory::Value)),
                fmt_score(entry.category_score(MetricCategory::Momentum)),
                fmt_score(entry.category_score(MetricCategory::Quality)),
                fmt_score(entry.category_score(MetricCategory::Risk)),
                entry.peer_stats.peers,
                if entry.peer_stats.low_confidence {
                    "low"
                } else {
                    "ok"
                },
            ));
        }

        output.push_str(&"=".repeat(78));
        output.push('\n');

        output
    }

    /// Format as Markdown for documentation.
    pub fn to_markdown(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("# Scoreboard: {}\n\n", self.title));
        output.push_str("| Ticker | Total | Value | Momentum | Quality | Risk | Peers |\n");
        output.push_str("|--------|-------|-------|----------|---------|------|-------|\n");

        for entry in &self.entries {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {}{} |\n",
                entry.ticker,
                fmt_score(entry.total_score),
                fmt_score(entry.category_score(MetricCategory::Value)),
                fmt_score(entry.category_score(MetricCategory::Momentum)),
                fmt_score(entry.category_score(MetricCategory::Quality)),
                fmt_score(entry.category_score(MetricCategory::Risk)),
                entry.peer_stats.peers,
                if entry.peer_stats.low_confidence {
                    " (low confidence)"
                } else {
                    ""
                },
            ));
        }

        output
    }
}

impl fmt::Display for ScoreboardReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scoreboard: {} ({} securities)", self.title, self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "  {:<8} {}", entry.ticker, fmt_score(entry.total_score))?;
        }
        Ok(())
    }
}

fn fmt_score(score: Option<f64>) -> String {
    score.map_or_else(|| "-".to_string(), |s| format!("{:.1}", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hobart_score::PeerSetStats;
    use std::collections::BTreeMap;

    fn scored(ticker: &str, total: Option<f64>) -> ScoredSecurity {
        ScoredSecurity {
            ticker: ticker.to_string(),
            metrics: hobart_factors::SecurityMetrics::new(ticker),
            metric_scores: BTreeMap::new(),
            category_scores: BTreeMap::new(),
            total_score: total,
            peer_stats: PeerSetStats::new(12, 12),
        }
    }

    #[test]
    fn report_ranks_by_total_score_with_unscored_last() {
        let report = ScoreboardReport::new(
            "balanced",
            vec![
                scored("MID", Some(48.0)),
                scored("NONE", None),
                scored("TOP", Some(92.5)),
            ],
        );

        let tickers: Vec<_> = report.entries.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["TOP", "MID", "NONE"]);
        assert_eq!(report.top(2).len(), 2);
        assert_eq!(report.top(10).len(), 3);
    }

    #[test]
    fn ascii_table_contains_rows_and_title() {
        let report = ScoreboardReport::new("balanced", vec![scored("ACME", Some(71.4))]);
        let table = report.to_ascii_table();

        assert!(table.contains("Scoreboard: balanced"));
        assert!(table.contains("ACME"));
        assert!(table.contains("71.4"));
    }

    #[test]
    fn markdown_renders_missing_scores_as_dash() {
        let report = ScoreboardReport::new("balanced", vec![scored("ACME", None)]);
        let md = report.to_markdown();

        assert!(md.contains("# Scoreboard: balanced"));
        assert!(md.contains("| ACME | - |"));
    }

    #[test]
    fn display_lists_every_entry() {
        let report = ScoreboardReport::new(
            "balanced",
            vec![scored("ACME", Some(71.4)), scored("BOLT", Some(12.0))],
        );
        let display = format!("{}", report);

        assert!(display.contains("2 securities"));
        assert!(display.contains("ACME"));
        assert!(display.contains("BOLT"));
    }
}
