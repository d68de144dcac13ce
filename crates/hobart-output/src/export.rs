//! Export functionality for Hobart results.
//!
//! Provides CSV and JSON export for scored universes, resolved betas, and
//! NAV risk metrics. CSV flattens the nested score maps into one row per
//! security; JSON preserves the full structure.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hobart_factors::MetricCategory;
use hobart_risk::{ResolvedBetas, RiskMetricsResult};
use hobart_score::ScoredSecurity;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Flattened scoring row for CSV export.
#[derive(Debug, Serialize, Deserialize)]
struct ScoredSecurityFlat {
    ticker: String,
    total_score: Option<f64>,
    value_score: Option<f64>,
    momentum_score: Option<f64>,
    quality_score: Option<f64>,
    risk_score: Option<f64>,
    peers: usize,
    low_confidence: bool,
}

impl From<&ScoredSecurity> for ScoredSecurityFlat {
    fn from(scored: &ScoredSecurity) -> Self {
        Self {
            ticker: scored.ticker.clone(),
            total_score: scored.total_score,
            value_score: scored.category_score(MetricCategory::Value),
            momentum_score: scored.category_score(MetricCategory::Momentum),
            quality_score: scored.category_score(MetricCategory::Quality),
            risk_score: scored.category_score(MetricCategory::Risk),
            peers: scored.peer_stats.peers,
            low_confidence: scored.peer_stats.low_confidence,
        }
    }
}

impl Exporter for Vec<ScoredSecurity> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for scored in self {
                    wtr.serialize(ScoredSecurityFlat::from(scored))?;
                }
                let data = wtr
                    .into_inner()
                    .map_err(|e| ExportError::Io(e.into_error()))?;
                Ok(String::from_utf8_lossy(&data).into_owned())
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

/// Resolved betas for one ticker, ready for export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaExport {
    /// Ticker symbol.
    pub ticker: String,
    /// Resolved 1-year beta.
    pub beta_1y: f64,
    /// Resolved 3-year beta.
    pub beta_3y: f64,
    /// Resolved 5-year beta.
    pub beta_5y: f64,
    /// Conservative true beta.
    pub true_beta: f64,
}

impl BetaExport {
    /// Pair a ticker with its resolved betas.
    pub fn new(ticker: impl Into<String>, betas: &ResolvedBetas) -> Self {
        Self {
            ticker: ticker.into(),
            beta_1y: betas.beta_1y,
            beta_3y: betas.beta_3y,
            beta_5y: betas.beta_5y,
            true_beta: betas.true_beta,
        }
    }
}

impl Exporter for Vec<BetaExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                for record in self {
                    wtr.serialize(record)?;
                }
                let data = wtr
                    .into_inner()
                    .map_err(|e| ExportError::Io(e.into_error()))?;
                Ok(String::from_utf8_lossy(&data).into_owned())
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for RiskMetricsResult {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let mut wtr = csv::Writer::from_writer(vec![]);
                wtr.serialize(self)?;
                let data = wtr
                    .into_inner()
                    .map_err(|e| ExportError::Io(e.into_error()))?;
                Ok(String::from_utf8_lossy(&data).into_owned())
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}
