//! Hobart CLI binary.
//!
//! Scores snapshot bundles, resolves true betas, and computes NAV-series
//! risk metrics from the command line.

mod input;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use hobart::engine::ScoringEngine;
use hobart::universe::{BenchmarkScope, PeerScope, UniverseScope};
use hobart_factors::{MetricCategory, SecurityMetrics, metrics_in_category};
use hobart_output::{BetaExport, ExportFormat, Exporter, RiskSummary, ScoreboardReport};
use hobart_risk::{
    CashEquivalents, RiskMetricsConfig, compute_risk_metrics, resolve_betas, trailing_window,
};
use hobart_score::{ScoreWeightProfile, ScoredSecurity};

use input::ScoreInput;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: multi-factor security scoring and risk analytics", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a snapshot bundle against a weight profile
    Score {
        /// Snapshot bundle (JSON)
        input: PathBuf,

        /// Weight profile file (JSON); defaults to the built-in balanced profile
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Peer scope: universe or benchmark
        #[arg(long, default_value = "universe")]
        scope: String,

        /// Output format (text, csv, or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Show only the top N securities in text output
        #[arg(long)]
        top: Option<usize>,
    },

    /// Compute risk metrics from a NAV series
    Risk {
        /// NAV series (CSV with date,nav columns)
        nav: PathBuf,

        /// Entity name for the report
        #[arg(long, default_value = "portfolio")]
        name: String,

        /// Trailing window of snapshots to analyze
        #[arg(long, default_value = "90")]
        window: usize,

        /// Minimum days of data required to publish statistics
        #[arg(long, default_value = "30")]
        min_days: usize,

        /// Annual risk-free rate as a fraction
        #[arg(long, default_value = "0.05")]
        risk_free_rate: f64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Resolve true betas from raw provider betas
    Betas {
        /// Raw betas (CSV with ticker,beta_1y,beta_3y,beta_5y,index_weight)
        input: PathBuf,

        /// Ticker of the reference index within the input file
        #[arg(long)]
        index: Option<String>,

        /// Output format (text, csv, or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the metric registry
    Metrics,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Score {
            input,
            profile,
            scope,
            format,
            out,
            top,
        } => score(&input, profile.as_deref(), &scope, &format, out.as_deref(), top),
        Commands::Risk {
            nav,
            name,
            window,
            min_days,
            risk_free_rate,
            format,
        } => risk(&nav, &name, window, min_days, risk_free_rate, &format),
        Commands::Betas {
            input,
            index,
            format,
        } => betas(&input, index.as_deref(), &format),
        Commands::Metrics => {
            list_metrics();
            Ok(())
        }
    }
}

fn score(
    input: &std::path::Path,
    profile: Option<&std::path::Path>,
    scope: &str,
    format: &str,
    out: Option<&std::path::Path>,
    top: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let bundle = ScoreInput::from_path(input)?;
    let securities = bundle.extract_all();
    info!(securities = securities.len(), "loaded snapshot bundle");

    let profile = match profile {
        Some(path) => ScoreWeightProfile::from_path(path)?,
        None => ScoreWeightProfile::balanced(),
    };
    debug!(profile = %profile.name, "weight profile resolved");

    let scored = match scope {
        "universe" => score_all(
            ScoringEngine::new(profile.clone(), UniverseScope),
            &securities,
        )?,
        "benchmark" => score_all(
            ScoringEngine::new(profile.clone(), BenchmarkScope::new(&bundle.benchmarks)),
            &securities,
        )?,
        other => return Err(format!("Unknown scope: {}", other).into()),
    };

    let export_format = parse_format(format)?;
    match export_format {
        None => {
            let mut report = ScoreboardReport::new(profile.name.clone(), scored);
            if let Some(n) = top {
                report.entries.truncate(n);
            }
            emit(report.to_ascii_table(), out)?;
        }
        Some(fmt) => {
            let ranked = ScoreboardReport::new(profile.name.clone(), scored).entries;
            emit(ranked.export_to_string(fmt)?, out)?;
        }
    }

    Ok(())
}

/// Fan scoring out across securities with a progress bar.
fn score_all<S: PeerScope + Sync>(
    engine: ScoringEngine<S>,
    securities: &[SecurityMetrics],
) -> Result<Vec<ScoredSecurity>, Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(securities.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("valid template")
            .progress_chars("█▓░"),
    );
    pb.set_message("Scoring securities...");

    let scored: Result<Vec<_>, _> = securities
        .par_iter()
        .map(|subject| {
            let result = engine.score_security(subject, securities);
            pb.inc(1);
            result
        })
        .collect();
    pb.finish_and_clear();

    Ok(scored?)
}

fn risk(
    nav: &std::path::Path,
    name: &str,
    window: usize,
    min_days: usize,
    risk_free_rate: f64,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let series = input::load_nav_series(nav)?;
    info!(snapshots = series.len(), window, "loaded NAV series");

    let windowed = trailing_window(&series, window);
    let config = RiskMetricsConfig {
        min_days,
        risk_free_rate,
        ..RiskMetricsConfig::default()
    };
    let metrics = compute_risk_metrics(&windowed, &config);

    let summary = RiskSummary::new(
        name,
        windowed.first().map(|s| s.date),
        windowed.last().map(|s| s.date),
        metrics,
    );

    if format.eq_ignore_ascii_case("json") {
        println!("{}", metrics.export_to_string(ExportFormat::PrettyJson)?);
    } else {
        print!("{}", summary.to_ascii_table());
    }

    Ok(())
}

fn betas(
    input: &std::path::Path,
    index: Option<&str>,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let rows = input::load_beta_rows(input)?;
    info!(rows = rows.len(), "loaded raw betas");

    let cash = CashEquivalents::default();

    // Resolve the reference index first; its true beta floors every
    // constituent's.
    let index_betas = index.and_then(|ticker| {
        rows.iter()
            .find(|row| row.ticker.eq_ignore_ascii_case(ticker))
            .map(|row| resolve_betas(&row.ticker, row.raw(), None, &cash))
    });

    let exports: Vec<BetaExport> = rows
        .iter()
        .map(|row| {
            let is_index = index.is_some_and(|t| row.ticker.eq_ignore_ascii_case(t));
            let reference = if row.in_reference_index() && !is_index {
                index_betas.as_ref()
            } else {
                None
            };
            let resolved = resolve_betas(&row.ticker, row.raw(), reference, &cash);
            BetaExport::new(&row.ticker, &resolved)
        })
        .collect();

    match parse_format(format)? {
        None => {
            println!("{:<10} {:>8} {:>8} {:>8} {:>10}", "Ticker", "1y", "3y", "5y", "True");
            println!("{}", "-".repeat(48));
            for export in &exports {
                println!(
                    "{:<10} {:>8.2} {:>8.2} {:>8.2} {:>10.2}",
                    export.ticker, export.beta_1y, export.beta_3y, export.beta_5y, export.true_beta
                );
            }
        }
        Some(fmt) => print!("{}", exports.export_to_string(fmt)?),
    }

    Ok(())
}

fn list_metrics() {
    println!("Hobart metric registry");
    println!("======================\n");

    for category in MetricCategory::all() {
        println!("{}:", category);
        for def in metrics_in_category(category) {
            let arrow = match def.direction {
                hobart_factors::Direction::HigherIsBetter => "higher",
                hobart_factors::Direction::LowerIsBetter => "lower",
            };
            println!("  {:<24} [{:<6} is better] {}", def.name, arrow, def.description);
        }
        println!();
    }
}

/// Map a format string to an export format; `text` maps to `None`.
fn parse_format(format: &str) -> Result<Option<ExportFormat>, Box<dyn std::error::Error>> {
    match format.to_lowercase().as_str() {
        "text" => Ok(None),
        "csv" => Ok(Some(ExportFormat::Csv)),
        "json" => Ok(Some(ExportFormat::PrettyJson)),
        other => Err(format!("Unknown format: {}", other).into()),
    }
}

/// Print to stdout or write to a file.
fn emit(content: String, out: Option<&std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
    match out {
        Some(path) => {
            std::fs::write(path, content)?;
            info!(path = %path.display(), "output written");
        }
        None => print!("{}", content),
    }
    Ok(())
}
