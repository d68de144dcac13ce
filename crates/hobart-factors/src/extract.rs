//! Metric extraction.
//!
//! Converts one provider snapshot plus its price history into a
//! [`SecurityMetrics`] record. Every rule degrades to `None` on missing or
//! unusable inputs; extraction never fails a security or a batch.
//!
//! Unit convention, fixed at this boundary: surprise and estimate-revision
//! fields arrive from the provider as fractions and leave here as percent.
//! Nothing downstream rescales them.

use crate::metrics::SecurityMetrics;
use crate::snapshot::{FundamentalSnapshot, PriceHistory};

/// Extract the full metric battery for one security.
pub fn extract_metrics(snapshot: &FundamentalSnapshot, prices: &PriceHistory) -> SecurityMetrics {
    SecurityMetrics {
        ticker: snapshot.ticker.clone(),

        pe_forward: positive_ratio(snapshot.pe_forward),
        pe_trailing: positive_ratio(snapshot.pe_trailing),
        ev_ebitda: positive_ratio(snapshot.ev_ebitda),
        ev_sales: positive_ratio(snapshot.ev_sales),
        target_upside: pct_change(prices.last, snapshot.target_price),

        return_1w: pct_return(prices.last, prices.close_1w),
        return_1m: pct_return(prices.last, prices.close_1m),
        return_3m: pct_return(prices.last, prices.close_3m),
        return_1y: pct_return(prices.last, prices.close_1y),
        return_qtd: pct_return(prices.last, prices.prior_quarter_close),
        return_ytd: pct_return(prices.last, prices.prior_year_close),
        high_52w_proximity: proximity(prices.last, snapshot.high_52w),
        eps_revision: revision(snapshot.eps_ntm, snapshot.eps_ntm_90d_ago),
        revenue_revision: revision(snapshot.revenue_ntm, snapshot.revenue_ntm_90d_ago),
        eps_surprise: fraction_to_pct(snapshot.eps_surprise),
        revenue_surprise: fraction_to_pct(snapshot.revenue_surprise),

        roic_1y: snapshot.roic_1y,
        roic_3y: snapshot.roic_3y,
        gross_profit_to_assets: safe_div(snapshot.gross_profit, snapshot.total_assets),
        fcf_to_assets: safe_div(snapshot.free_cash_flow, snapshot.total_assets),
        accruals_pct: snapshot.accruals_pct,

        beta: snapshot.beta_1y,
        volatility_30d: snapshot.volatility_30d,
        net_debt_to_ebitda: safe_div(snapshot.net_debt, snapshot.ebitda),
    }
}

/// Valuation multiples are only rankable when positive; a negative P/E or
/// EV/EBITDA would invert the cheap/expensive ordering.
fn positive_ratio(ratio: Option<f64>) -> Option<f64> {
    ratio.filter(|r| *r > 0.0)
}

/// Percent return of `last` over a historical `base` close.
fn pct_return(last: Option<f64>, base: Option<f64>) -> Option<f64> {
    match (last, base) {
        (Some(last), Some(base)) if base > 0.0 => Some((last / base - 1.0) * 100.0),
        _ => None,
    }
}

/// Percent distance from `price` up to `target`.
fn pct_change(price: Option<f64>, target: Option<f64>) -> Option<f64> {
    match (price, target) {
        (Some(price), Some(target)) if price > 0.0 && target > 0.0 => {
            Some((target / price - 1.0) * 100.0)
        }
        _ => None,
    }
}

/// Last close as a percentage of a (positive) reference high.
fn proximity(last: Option<f64>, high: Option<f64>) -> Option<f64> {
    match (last, high) {
        (Some(last), Some(high)) if last > 0.0 && high > 0.0 => Some(last / high * 100.0),
        _ => None,
    }
}

/// Percent change of a consensus estimate against its 90-day-prior value.
///
/// The prior estimate anchors the denominator in absolute terms so a
/// negative base still yields a directionally-correct revision.
fn revision(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    match (current, prior) {
        (Some(current), Some(prior)) if prior != 0.0 => {
            Some((current - prior) / prior.abs() * 100.0)
        }
        _ => None,
    }
}

/// Provider surprise fields are fractions; scale to percent exactly once.
fn fraction_to_pct(fraction: Option<f64>) -> Option<f64> {
    fraction.map(|f| f * 100.0)
}

/// Guarded ratio: `None` unless the denominator is strictly positive.
fn safe_div(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d > 0.0 => Some(n / d),
        _ => None,
    }
}
