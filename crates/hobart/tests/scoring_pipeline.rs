//! End-to-end scoring pipeline tests: snapshots in, ranked scores out.

use hobart::engine::ScoringEngine;
use hobart::universe::{BenchmarkScope, BenchmarkWeights, PeerScope, UniverseScope};
use hobart_factors::{
    FundamentalSnapshot, MetricCategory, PriceHistory, SecurityMetrics, extract_metrics,
};
use hobart_score::ScoreWeightProfile;

fn snapshot(ticker: &str, pe: f64, roic: f64, surprise_fraction: f64) -> FundamentalSnapshot {
    FundamentalSnapshot {
        ticker: ticker.to_string(),
        pe_forward: Some(pe),
        roic_1y: Some(roic),
        eps_surprise: Some(surprise_fraction),
        ..FundamentalSnapshot::default()
    }
}

fn prices(last: f64, month_ago: f64) -> PriceHistory {
    PriceHistory {
        last: Some(last),
        close_1m: Some(month_ago),
        ..PriceHistory::default()
    }
}

/// Twelve securities with spread-out fundamentals, extracted end to end.
fn universe() -> Vec<SecurityMetrics> {
    (0..12)
        .map(|i| {
            let ticker = format!("SEC{:02}", i);
            let snap = snapshot(&ticker, 10.0 + i as f64, 0.20 - 0.01 * i as f64, 0.01);
            let hist = prices(100.0 + i as f64, 100.0);
            extract_metrics(&snap, &hist)
        })
        .collect()
}

#[test]
fn universe_scoring_orders_by_fundamentals() {
    let securities = universe();
    let engine = ScoringEngine::new(ScoreWeightProfile::balanced(), UniverseScope);
    let scored = engine.score_universe(&securities).unwrap();

    // SEC00 has the lowest P/E and the highest ROIC of 12 peers: it beats
    // the other 11 on both metrics.
    let top = &scored[0];
    assert_eq!(top.ticker, "SEC00");
    assert_eq!(top.metric_score("pe_forward"), Some(91.7));
    assert_eq!(top.metric_score("roic_1y"), Some(91.7));

    // Identical surprises tie; ties are not "worse", so everyone scores 0.
    for entry in &scored {
        assert_eq!(entry.metric_score("eps_surprise"), Some(0.0));
    }

    // Twelve peers, none complete (only a few fields populated).
    assert_eq!(top.peer_stats.peers, 12);
    assert!(top.peer_stats.low_confidence);
}

#[test]
fn every_published_score_is_rounded_to_one_decimal() {
    let securities = universe();
    let engine = ScoringEngine::new(ScoreWeightProfile::balanced(), UniverseScope);
    let scored = engine.score_universe(&securities).unwrap();

    let check = |score: f64| {
        let scaled = score * 10.0;
        assert!(
            (scaled - scaled.round()).abs() < 1e-9,
            "score {} not rounded to one decimal",
            score
        );
        assert!((0.0..=100.0).contains(&score));
    };

    for entry in &scored {
        entry.metric_scores.values().flatten().for_each(|s| check(*s));
        entry.category_scores.values().flatten().for_each(|s| check(*s));
        if let Some(total) = entry.total_score {
            check(total);
        }
    }
}

#[test]
fn benchmark_scoping_changes_the_peer_base() {
    let securities = universe();

    // SEC00 and SEC01 share a benchmark; SEC11 sits in another.
    let mut weights = BenchmarkWeights::new();
    weights.insert("SMALL", "SEC00", 0.6);
    weights.insert("SMALL", "SEC01", 0.4);
    weights.insert("BROAD", "SEC11", 1.0);

    let scope = BenchmarkScope::new(&weights);
    let engine = ScoringEngine::new(ScoreWeightProfile::balanced(), scope);
    let scored = engine.score_universe(&securities).unwrap();

    // Within the two-member benchmark, SEC00 beats one peer of two.
    assert_eq!(scored[0].peer_stats.peers, 2);
    assert_eq!(scored[0].metric_score("pe_forward"), Some(50.0));
    assert_eq!(scored[1].metric_score("pe_forward"), Some(0.0));

    // Securities with no benchmark weight anywhere rank against nobody.
    let unassigned = &scored[5];
    assert_eq!(unassigned.peer_stats.peers, 0);
    assert_eq!(unassigned.total_score, None);
}

#[test]
fn scope_strategies_share_one_peer_set_per_subject() {
    let securities = universe();
    let scope = UniverseScope;
    let peers = scope.peer_set(&securities[3], &securities);

    // The peer set the strategy returns is what every metric ranks against;
    // its stats match the run's scored output.
    let engine = ScoringEngine::new(ScoreWeightProfile::balanced(), UniverseScope);
    let scored = engine.score_security(&securities[3], &securities).unwrap();
    assert_eq!(scored.peer_stats.peers, peers.stats.peers);
    assert_eq!(
        scored.peer_stats.complete_fraction,
        peers.stats.complete_fraction
    );
}

#[test]
fn single_category_profile_drives_the_total() {
    let securities = universe();
    let profile = ScoreWeightProfile::from_json_str(
        r#"{
            "name": "value-only",
            "category_weights": {"value": 1.0},
            "metric_weights": {"value": {"pe_forward": 1.0}}
        }"#,
    )
    .unwrap();

    let engine = ScoringEngine::new(profile, UniverseScope);
    let scored = engine.score_universe(&securities).unwrap();

    for entry in &scored {
        // Momentum data exists but carries no weight; the category
        // composite nulls out and the total equals the value composite.
        assert_eq!(entry.category_score(MetricCategory::Momentum), None);
        assert_eq!(entry.total_score, entry.category_score(MetricCategory::Value));
    }
}
