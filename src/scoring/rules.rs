//! The fixed rule table
//!
//! One rule per [`ThresholdKey`], in schema order. Caps add up to 100, so a
//! score can only saturate when every rule fires at full strength.

use crate::thresholds::ThresholdKey;

/// Which side of the threshold is suspicious
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoringRule {
    pub key: ThresholdKey,
    pub direction: Direction,
    /// Maximum points this rule can add
    pub cap: f64,
    /// Points per unit of distance from the threshold
    pub scale: f64,
    pub indicator: &'static str,
}

impl ScoringRule {
    const fn new(
        key: ThresholdKey,
        direction: Direction,
        cap: f64,
        scale: f64,
        indicator: &'static str,
    ) -> Self {
        Self {
            key,
            direction,
            cap,
            scale,
            indicator,
        }
    }

    /// Points contributed by `value` against `threshold`, or `None` when the
    /// rule does not fire. Non-finite inputs never fire.
    pub fn evaluate(&self, value: f64, threshold: f64) -> Option<f64> {
        if !value.is_finite() || !threshold.is_finite() {
            return None;
        }
        let fired = match self.direction {
            Direction::Above => value > threshold,
            Direction::Below => value < threshold,
        };
        fired.then(|| ((value - threshold).abs() * self.scale).min(self.cap))
    }
}

pub const RULES: [ScoringRule; 14] = {
    use Direction::{Above, Below};
    use ScoringRule as R;
    use ThresholdKey as K;
    [
        R::new(K::RepeatingPatterns, Above, 3.0, 5.0, "Repetitive tile patterns detected"),
        R::new(K::SharpEdges, Above, 20.0, 200.0, "Artificial sharp edges detected"),
        R::new(K::Uniformity, Below, 10.0, 100.0, "Lack of characteristic texture uniformity"),
        R::new(K::UnnaturalGradients, Above, 10.0, 100.0, "Unnatural gradients detected"),
        R::new(K::Complexity, Above, 15.0, 150.0, "Abnormally high texture complexity"),
        R::new(K::ColorBanding, Above, 10.0, 100.0, "Artificial color banding detected"),
        R::new(K::UniqueColors, Above, 13.0, 0.005, "Unusual number of unique colors"),
        R::new(K::SaturationVariance, Below, 3.0, 50.0, "Too uniform saturation variation"),
        R::new(K::HorizontalSymmetry, Above, 2.0, 10.0, "Suspicious horizontal symmetry"),
        R::new(K::VerticalSymmetry, Above, 2.0, 10.0, "Suspicious vertical symmetry"),
        R::new(K::ArtificialNoise, Above, 5.0, 10.0, "Artificial digital noise detected"),
        R::new(K::NaturalNoise, Below, 3.0, 50.0, "Absence of natural noise"),
        R::new(K::CompressionArtifacts, Above, 2.0, 5.0, "Suspicious compression artifacts"),
        R::new(K::PerfectEdges, Above, 2.0, 5.0, "Too perfect edges"),
    ]
};
