//! NAV-series risk metrics.
//!
//! Computes Sharpe ratio, annualized volatility, one-tailed parametric 95%
//! VaR, and max drawdown from a net-asset-value time series. A series
//! shorter than the configured minimum is a normal, reportable state: all
//! four statistics come back `None` alongside the day counters.

use chrono::NaiveDate;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// One-tailed z-score at 95% confidence for the parametric VaR.
const VAR_95_Z: f64 = 1.645;

/// A single NAV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavSnapshot {
    /// Observation date.
    pub date: NaiveDate,
    /// Net asset value at the close of `date`.
    pub nav: f64,
}

/// Configuration for the risk metrics calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricsConfig {
    /// Minimum number of snapshots required to publish statistics.
    pub min_days: usize,
    /// Annual risk-free rate, as a fraction (0.05 = 5%).
    pub risk_free_rate: f64,
    /// Trading days per year used for annualization.
    pub trading_days: f64,
}

impl Default for RiskMetricsConfig {
    fn default() -> Self {
        Self {
            min_days: 30,
            risk_free_rate: 0.05,
            trading_days: 252.0,
        }
    }
}

/// Risk statistics for one NAV window.
///
/// The four statistics are `None` together exactly when
/// `days_of_data < requires_days`. Percentage-valued fields are already
/// scaled by 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetricsResult {
    /// Annualized Sharpe ratio.
    pub sharpe_ratio: Option<f64>,
    /// Annualized volatility, percent.
    pub annualized_volatility: Option<f64>,
    /// One-tailed parametric 95% daily VaR, percent.
    pub var_95: Option<f64>,
    /// Worst peak-to-trough drawdown over the window, percent (negative).
    pub max_drawdown: Option<f64>,
    /// Number of snapshots supplied.
    pub days_of_data: usize,
    /// Number of snapshots required before statistics are published.
    pub requires_days: usize,
}

impl RiskMetricsResult {
    /// Whether the window was long enough to publish statistics.
    pub const fn has_statistics(&self) -> bool {
        self.days_of_data >= self.requires_days
    }
}

/// Compute risk statistics over a NAV window.
///
/// Snapshots are sorted by date internally; callers may pass them in any
/// order. Daily simple returns skip any pair whose previous NAV is not
/// strictly positive; max drawdown is computed from the raw NAV levels and
/// is therefore unaffected by skipped return pairs.
pub fn compute_risk_metrics(
    snapshots: &[NavSnapshot],
    config: &RiskMetricsConfig,
) -> RiskMetricsResult {
    let days_of_data = snapshots.len();

    if days_of_data < config.min_days {
        return RiskMetricsResult {
            sharpe_ratio: None,
            annualized_volatility: None,
            var_95: None,
            max_drawdown: None,
            days_of_data,
            requires_days: config.min_days,
        };
    }

    let mut ordered: Vec<NavSnapshot> = snapshots.to_vec();
    ordered.sort_by_key(|s| s.date);

    let returns: Array1<f64> = ordered
        .windows(2)
        .filter(|pair| pair[0].nav > 0.0)
        .map(|pair| pair[1].nav / pair[0].nav - 1.0)
        .collect();

    let mean = returns.mean().unwrap_or(0.0);
    // Population statistics: the window is the whole universe of interest.
    let variance = returns.mapv(|r| (r - mean).powi(2)).mean().unwrap_or(0.0);
    let stddev = variance.sqrt();

    let annual_factor = config.trading_days.sqrt();
    let annualized_volatility = stddev * annual_factor * 100.0;

    let sharpe_denominator = stddev * annual_factor;
    let sharpe_ratio = if sharpe_denominator == 0.0 {
        0.0
    } else {
        (mean * config.trading_days - config.risk_free_rate) / sharpe_denominator
    };

    let var_95 = (mean - VAR_95_Z * stddev) * 100.0;

    RiskMetricsResult {
        sharpe_ratio: Some(sharpe_ratio),
        annualized_volatility: Some(annualized_volatility),
        var_95: Some(var_95),
        max_drawdown: Some(max_drawdown_pct(&ordered)),
        days_of_data,
        requires_days: config.min_days,
    }
}

/// Worst drawdown of the NAV level series against its running peak, percent.
fn max_drawdown_pct(ordered: &[NavSnapshot]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;

    for snapshot in ordered {
        if snapshot.nav > peak {
            peak = snapshot.nav;
        }
        if peak > 0.0 {
            let drawdown = (snapshot.nav - peak) / peak;
            if drawdown < worst {
                worst = drawdown;
            }
        }
    }

    worst * 100.0
}

/// The trailing `days` snapshots of a series, sorted ascending by date.
///
/// NAV histories accumulate append-only; each risk request consumes only a
/// trailing slice of them.
pub fn trailing_window(snapshots: &[NavSnapshot], days: usize) -> Vec<NavSnapshot> {
    let mut ordered: Vec<NavSnapshot> = snapshots.to_vec();
    ordered.sort_by_key(|s| s.date);
    let start = ordered.len().saturating_sub(days);
    ordered.split_off(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn series(navs: &[f64]) -> Vec<NavSnapshot> {
        navs.iter()
            .enumerate()
            .map(|(i, &nav)| NavSnapshot {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                nav,
            })
            .collect()
    }

    #[test]
    fn short_window_reports_counters_without_statistics() {
        let snapshots = series(&vec![100.0; 20]);
        let result = compute_risk_metrics(&snapshots, &RiskMetricsConfig::default());

        assert_eq!(result.sharpe_ratio, None);
        assert_eq!(result.annualized_volatility, None);
        assert_eq!(result.var_95, None);
        assert_eq!(result.max_drawdown, None);
        assert_eq!(result.days_of_data, 20);
        assert_eq!(result.requires_days, 30);
        assert!(!result.has_statistics());
    }

    #[test]
    fn flat_series_has_zero_volatility_and_guarded_sharpe() {
        let snapshots = series(&vec![100.0; 40]);
        let result = compute_risk_metrics(&snapshots, &RiskMetricsConfig::default());

        assert_relative_eq!(result.annualized_volatility.unwrap(), 0.0);
        // Zero volatility would divide by zero; the guard pins Sharpe to 0.
        assert_relative_eq!(result.sharpe_ratio.unwrap(), 0.0);
        assert_relative_eq!(result.var_95.unwrap(), 0.0);
        assert_relative_eq!(result.max_drawdown.unwrap(), 0.0);
    }

    #[test]
    fn max_drawdown_tracks_the_running_peak() {
        let config = RiskMetricsConfig {
            min_days: 4,
            ..RiskMetricsConfig::default()
        };
        let snapshots = series(&[100.0, 110.0, 90.0, 95.0]);
        let result = compute_risk_metrics(&snapshots, &config);

        // Peaks 100, 110, 110, 110; worst drawdown (90-110)/110.
        assert_relative_eq!(result.max_drawdown.unwrap(), -18.181818, epsilon = 1e-4);
    }

    #[test]
    fn statistics_match_hand_computed_values() {
        let config = RiskMetricsConfig {
            min_days: 3,
            risk_free_rate: 0.05,
            trading_days: 252.0,
        };
        // Returns: +10%, -10%. Population mean 0, stddev 0.1.
        let snapshots = series(&[100.0, 110.0, 99.0]);
        let result = compute_risk_metrics(&snapshots, &config);

        assert_relative_eq!(
            result.annualized_volatility.unwrap(),
            0.1 * 252.0_f64.sqrt() * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.sharpe_ratio.unwrap(),
            (0.0 - 0.05) / (0.1 * 252.0_f64.sqrt()),
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.var_95.unwrap(),
            (0.0 - 1.645 * 0.1) * 100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(result.max_drawdown.unwrap(), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn unsorted_input_is_sorted_before_differencing() {
        let config = RiskMetricsConfig {
            min_days: 3,
            ..RiskMetricsConfig::default()
        };
        let mut snapshots = series(&[100.0, 110.0, 99.0]);
        snapshots.reverse();
        let shuffled = compute_risk_metrics(&snapshots, &config);

        let ordered = compute_risk_metrics(&series(&[100.0, 110.0, 99.0]), &config);
        assert_eq!(shuffled, ordered);
    }

    #[test]
    fn non_positive_navs_skip_the_return_pair_only() {
        let config = RiskMetricsConfig {
            min_days: 5,
            ..RiskMetricsConfig::default()
        };
        // The pair following the 0.0 NAV has a non-positive denominator
        // and is skipped; drawdown still sees the full level series.
        let snapshots = series(&[100.0, 0.0, 100.0, 110.0, 121.0]);
        let result = compute_risk_metrics(&snapshots, &config);

        assert!(result.has_statistics());
        assert_relative_eq!(result.max_drawdown.unwrap(), -100.0, epsilon = 1e-9);
        assert!(result.annualized_volatility.unwrap().is_finite());
    }

    #[test]
    fn trailing_window_takes_the_most_recent_days() {
        let snapshots = series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let window = trailing_window(&snapshots, 3);

        assert_eq!(window.len(), 3);
        assert_relative_eq!(window[0].nav, 3.0);
        assert_relative_eq!(window[2].nav, 5.0);

        let all = trailing_window(&snapshots, 90);
        assert_eq!(all.len(), 5);
    }
}
