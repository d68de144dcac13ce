//! Score weight profiles.
//!
//! A profile names a per-category weight plus a per-category map of
//! metric weights. Profiles are externally configured (JSON) and loaded
//! read-only for the duration of a scoring run. Weights need not sum to 1;
//! metrics absent from the profile simply carry weight 0 and fall out of
//! the composite through renormalization.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use hobart_factors::{MetricCategory, available_metrics, metrics_in_category};

use crate::error::ScoreError;

/// A named weighting of categories and metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeightProfile {
    /// Profile name.
    pub name: String,
    /// Weight per category for the total-score composite.
    #[serde(default)]
    pub category_weights: BTreeMap<MetricCategory, f64>,
    /// Weight per metric, keyed by category then metric name.
    #[serde(default)]
    pub metric_weights: BTreeMap<MetricCategory, BTreeMap<String, f64>>,
}

impl ScoreWeightProfile {
    /// The built-in balanced profile: value and momentum lead, with equal
    /// metric weights inside each category.
    pub fn balanced() -> Self {
        let category_weights = BTreeMap::from([
            (MetricCategory::Value, 0.30),
            (MetricCategory::Momentum, 0.30),
            (MetricCategory::Quality, 0.25),
            (MetricCategory::Risk, 0.15),
        ]);

        let metric_weights = MetricCategory::all()
            .into_iter()
            .map(|category| {
                let weights = metrics_in_category(category)
                    .into_iter()
                    .map(|def| (def.name.to_string(), 1.0))
                    .collect();
                (category, weights)
            })
            .collect();

        Self {
            name: "balanced".to_string(),
            category_weights,
            metric_weights,
        }
    }

    /// Load a profile from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ScoreError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScoreError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    /// Weight of a category in the total composite (0 when unspecified).
    pub fn category_weight(&self, category: MetricCategory) -> f64 {
        self.category_weights.get(&category).copied().unwrap_or(0.0)
    }

    /// Weight of a metric inside its category (0 when unspecified).
    pub fn metric_weight(&self, category: MetricCategory, metric: &str) -> f64 {
        self.metric_weights
            .get(&category)
            .and_then(|weights| weights.get(metric))
            .copied()
            .unwrap_or(0.0)
    }

    /// Reject profiles that reference metrics the registry does not know.
    ///
    /// Unknown keys would otherwise be dead weight the operator believes is
    /// applied; that is a configuration defect, not missing data.
    pub fn validate(&self) -> Result<(), ScoreError> {
        for weights in self.metric_weights.values() {
            for metric in weights.keys() {
                if !available_metrics().iter().any(|def| def.name == *metric) {
                    return Err(ScoreError::UnknownMetric {
                        profile: self.name.clone(),
                        metric: metric.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for ScoreWeightProfile {
    fn default() -> Self {
        Self::balanced()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_profile_covers_every_metric() {
        let profile = ScoreWeightProfile::balanced();
        for def in available_metrics() {
            assert_eq!(
                profile.metric_weight(def.category, def.name),
                1.0,
                "metric {} missing from balanced profile",
                def.name
            );
        }
        profile.validate().unwrap();
    }

    #[test]
    fn unspecified_weights_default_to_zero() {
        let profile = ScoreWeightProfile {
            name: "sparse".to_string(),
            category_weights: BTreeMap::from([(MetricCategory::Value, 1.0)]),
            metric_weights: BTreeMap::new(),
        };

        assert_eq!(profile.category_weight(MetricCategory::Momentum), 0.0);
        assert_eq!(profile.metric_weight(MetricCategory::Value, "pe_forward"), 0.0);
    }

    #[test]
    fn profile_round_trips_through_json() {
        let json = r#"{
            "name": "value-tilt",
            "category_weights": {"value": 0.6, "quality": 0.4},
            "metric_weights": {
                "value": {"pe_forward": 2.0, "ev_ebitda": 1.0},
                "quality": {"roic_1y": 1.0}
            }
        }"#;

        let profile = ScoreWeightProfile::from_json_str(json).unwrap();
        assert_eq!(profile.name, "value-tilt");
        assert_eq!(profile.category_weight(MetricCategory::Value), 0.6);
        assert_eq!(profile.metric_weight(MetricCategory::Value, "pe_forward"), 2.0);
        assert_eq!(profile.metric_weight(MetricCategory::Value, "ev_sales"), 0.0);
    }

    #[test]
    fn unknown_metric_key_is_rejected() {
        let json = r#"{
            "name": "typo",
            "metric_weights": {"value": {"pe_fwd": 1.0}}
        }"#;

        let err = ScoreWeightProfile::from_json_str(json).unwrap_err();
        assert!(matches!(err, ScoreError::UnknownMetric { .. }));
    }
}
