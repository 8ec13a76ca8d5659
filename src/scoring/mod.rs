//! Synthetic-likelihood scoring
//!
//! Every threshold has one rule. A rule fires when its metric lies strictly
//! on the suspicious side of the threshold and then adds points
//! proportional to the distance, up to the rule's cap.
//!
//! # Scoring Formula
//!
//! ```text
//! contribution = min(cap, |value - threshold| × scale)   (only when fired)
//! score        = clamp(Σ contributions, 0, 100)
//! ```
//!
//! # Caps
//!
//! - sharpEdges: 20
//! - complexity: 15
//! - uniqueColors: 13
//! - uniformity, unnaturalGradients, colorBanding: 10 each
//! - artificialNoise: 5
//! - repeatingPatterns, saturationVariance, naturalNoise: 3 each
//! - symmetry, compressionArtifacts, perfectEdges: 2 each

mod rules;

pub use rules::{Direction, ScoringRule, RULES};

use crate::features::FeatureVector;
use crate::thresholds::ThresholdConfig;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_SCORE: f64 = 100.0;

/// Coarse reading of a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Likelihood {
    Low,
    Moderate,
    High,
}

impl Likelihood {
    pub fn from_score(score: f64) -> Self {
        if score >= 70.0 {
            Likelihood::High
        } else if score >= 50.0 {
            Likelihood::Moderate
        } else {
            Likelihood::Low
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Likelihood::High => "high probability of AI generation",
            Likelihood::Moderate => "moderate probability of AI generation",
            Likelihood::Low => "low probability of AI generation",
        }
    }
}

impl fmt::Display for Likelihood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Likelihood::High => write!(f, "high"),
            Likelihood::Moderate => write!(f, "moderate"),
            Likelihood::Low => write!(f, "low"),
        }
    }
}

/// Result of scoring one feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// 0-100, higher means more likely synthetic
    pub score: f64,
    /// Messages of the fired rules, in rule order
    pub indicators: Vec<String>,
    /// Points per fired metric, in rule order
    pub contributions: IndexMap<String, f64>,
}

impl ScoreResult {
    pub fn likelihood(&self) -> Likelihood {
        Likelihood::from_score(self.score)
    }
}

/// Score a feature vector against a threshold set.
pub fn score(features: &FeatureVector, thresholds: &ThresholdConfig) -> ScoreResult {
    let mut indicators = Vec::new();
    let mut contributions = IndexMap::new();

    for rule in RULES.iter() {
        let value = rule.key.feature_value(features);
        if let Some(points) = rule.evaluate(value, thresholds.get(rule.key)) {
            indicators.push(rule.indicator.to_string());
            contributions.insert(rule.key.metric_name().to_string(), points);
        }
    }

    let total: f64 = contributions.values().sum();
    ScoreResult {
        score: total.clamp(0.0, MAX_SCORE),
        indicators,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{extract, test_support::*};
    use crate::thresholds::ThresholdKey;

    fn default_score(f: &FeatureVector) -> ScoreResult {
        score(f, &ThresholdConfig::default())
    }

    #[test]
    fn test_uniform_gray_scores_low() {
        let result = default_score(&extract(&solid(64, 64, [128, 128, 128])));
        assert!(result.score < 20.0, "score {}", result.score);
        assert!((result.score - 18.25).abs() < 1e-9);
        assert_eq!(result.likelihood(), Likelihood::Low);
        assert!(!result.contributions.contains_key("sharpEdges"));
    }

    #[test]
    fn test_checkerboard_scores_higher() {
        let uniform = default_score(&extract(&solid(64, 64, [128, 128, 128])));
        let features = extract(&checkerboard(64, 64));
        let result = default_score(&features);

        assert!(features.patterns.sharp_edges > 0.06);
        assert!(result
            .indicators
            .iter()
            .any(|i| i == "Repetitive tile patterns detected"));
        assert!(result.score > uniform.score);
        assert!((result.score - 60.25).abs() < 1e-9);
        assert_eq!(result.likelihood(), Likelihood::Moderate);
    }

    #[test]
    fn test_indicators_follow_rule_order() {
        let result = default_score(&extract(&checkerboard(64, 64)));
        let order: Vec<usize> = result
            .indicators
            .iter()
            .map(|i| RULES.iter().position(|r| r.indicator == i).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert_eq!(result.indicators.len(), result.contributions.len());
    }

    #[test]
    fn test_contributions_sum_to_score() {
        let result = default_score(&extract(&noisy(90, 70, 11)));
        let sum: f64 = result.contributions.values().sum();
        assert!((sum - result.score).abs() < 1e-9);
        assert!((0.0..=MAX_SCORE).contains(&result.score));
    }

    #[test]
    fn test_every_rule_at_full_strength_reaches_100() {
        let mut thresholds = ThresholdConfig::default();
        let mut features = FeatureVector::default();
        features.colors.unique_colors = 1_000_000;
        for rule in RULES.iter() {
            // fractions sit at 0 in the default vector; push thresholds far away
            let value = rule.key.feature_value(&features);
            let far = match rule.direction {
                Direction::Above => value - 1e9,
                Direction::Below => value + 1e9,
            };
            thresholds.set(rule.key, far);
        }
        let result = score(&features, &thresholds);
        assert_eq!(result.score, MAX_SCORE);
        assert_eq!(result.indicators.len(), RULES.len());
    }

    #[test]
    fn test_non_finite_threshold_is_skipped() {
        let features = extract(&checkerboard(64, 64));
        let mut thresholds = ThresholdConfig::default();
        thresholds.set(ThresholdKey::SharpEdges, f64::NAN);
        let result = score(&features, &thresholds);
        assert!(!result.contributions.contains_key("sharpEdges"));
        assert!(!result
            .indicators
            .iter()
            .any(|i| i == "Artificial sharp edges detected"));
    }

    #[test]
    fn test_likelihood_bands() {
        assert_eq!(Likelihood::from_score(0.0), Likelihood::Low);
        assert_eq!(Likelihood::from_score(49.99), Likelihood::Low);
        assert_eq!(Likelihood::from_score(50.0), Likelihood::Moderate);
        assert_eq!(Likelihood::from_score(70.0), Likelihood::High);
    }
}
