//! Per-metric decision thresholds
//!
//! The threshold schema is fixed: six categories, fourteen metrics. Every
//! threshold is addressed by a [`ThresholdKey`], which also knows which
//! [`FeatureVector`] metric it is compared against. Deserialization rejects
//! unknown and missing keys, so a [`ThresholdConfig`] is always complete.

use crate::error::{DetectError, Result};
use crate::features::FeatureVector;
use serde::{Deserialize, Serialize};

/// Metric categories, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Patterns,
    Textures,
    Colors,
    Symmetry,
    Noise,
    Artifacts,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::Patterns,
            Category::Textures,
            Category::Colors,
            Category::Symmetry,
            Category::Noise,
            Category::Artifacts,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::Patterns => "patterns",
            Category::Textures => "textures",
            Category::Colors => "colors",
            Category::Symmetry => "symmetry",
            Category::Noise => "noise",
            Category::Artifacts => "artifacts",
        }
    }
}

/// One threshold in the canonical schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThresholdKey {
    RepeatingPatterns,
    SharpEdges,
    Uniformity,
    UnnaturalGradients,
    Complexity,
    ColorBanding,
    UniqueColors,
    SaturationVariance,
    HorizontalSymmetry,
    VerticalSymmetry,
    ArtificialNoise,
    NaturalNoise,
    CompressionArtifacts,
    PerfectEdges,
}

impl ThresholdKey {
    /// All keys in schema order (category order, then metric order)
    pub fn all() -> &'static [ThresholdKey] {
        &[
            ThresholdKey::RepeatingPatterns,
            ThresholdKey::SharpEdges,
            ThresholdKey::Uniformity,
            ThresholdKey::UnnaturalGradients,
            ThresholdKey::Complexity,
            ThresholdKey::ColorBanding,
            ThresholdKey::UniqueColors,
            ThresholdKey::SaturationVariance,
            ThresholdKey::HorizontalSymmetry,
            ThresholdKey::VerticalSymmetry,
            ThresholdKey::ArtificialNoise,
            ThresholdKey::NaturalNoise,
            ThresholdKey::CompressionArtifacts,
            ThresholdKey::PerfectEdges,
        ]
    }

    pub fn category(&self) -> Category {
        match self {
            ThresholdKey::RepeatingPatterns | ThresholdKey::SharpEdges => Category::Patterns,
            ThresholdKey::Uniformity
            | ThresholdKey::UnnaturalGradients
            | ThresholdKey::Complexity => Category::Textures,
            ThresholdKey::ColorBanding
            | ThresholdKey::UniqueColors
            | ThresholdKey::SaturationVariance => Category::Colors,
            ThresholdKey::HorizontalSymmetry | ThresholdKey::VerticalSymmetry => Category::Symmetry,
            ThresholdKey::ArtificialNoise | ThresholdKey::NaturalNoise => Category::Noise,
            ThresholdKey::CompressionArtifacts | ThresholdKey::PerfectEdges => Category::Artifacts,
        }
    }

    /// Key name inside its category in the persisted model
    pub fn schema_name(&self) -> &'static str {
        match self {
            ThresholdKey::RepeatingPatterns => "repeatingPatterns",
            ThresholdKey::SharpEdges => "sharpEdges",
            ThresholdKey::Uniformity => "uniformity",
            ThresholdKey::UnnaturalGradients => "unnaturalGradients",
            ThresholdKey::Complexity => "complexity",
            ThresholdKey::ColorBanding => "colorBanding",
            ThresholdKey::UniqueColors => "uniqueColors",
            ThresholdKey::SaturationVariance => "saturationVariance",
            ThresholdKey::HorizontalSymmetry => "horizontalThreshold",
            ThresholdKey::VerticalSymmetry => "verticalThreshold",
            ThresholdKey::ArtificialNoise => "artificialNoiseThreshold",
            ThresholdKey::NaturalNoise => "naturalNoiseThreshold",
            ThresholdKey::CompressionArtifacts => "compressionArtifacts",
            ThresholdKey::PerfectEdges => "perfectEdges",
        }
    }

    /// Name of the feature metric this threshold is compared against
    pub fn metric_name(&self) -> &'static str {
        match self {
            ThresholdKey::HorizontalSymmetry => "horizontalSymmetry",
            ThresholdKey::VerticalSymmetry => "verticalSymmetry",
            ThresholdKey::ArtificialNoise => "artificialNoise",
            ThresholdKey::NaturalNoise => "naturalNoise",
            other => other.schema_name(),
        }
    }

    /// `category.metric` path, e.g. `symmetry.horizontalThreshold`
    pub fn path(&self) -> String {
        format!("{}.{}", self.category().name(), self.schema_name())
    }

    /// `category.metric` path of the feature metric, e.g. `symmetry.horizontalSymmetry`
    pub fn metric_path(&self) -> String {
        format!("{}.{}", self.category().name(), self.metric_name())
    }

    /// Whether recalibration moves this threshold. Only keys stored under
    /// the name of their feature metric are learned from the corpus; the
    /// symmetry and noise thresholds keep their configured values.
    pub fn is_calibrated(&self) -> bool {
        self.schema_name() == self.metric_name()
    }

    /// Whether the threshold is a count rather than a fraction in [0, 1]
    pub fn is_count(&self) -> bool {
        matches!(self, ThresholdKey::UniqueColors)
    }

    /// Read the metric this key applies to
    pub fn feature_value(&self, f: &FeatureVector) -> f64 {
        match self {
            ThresholdKey::RepeatingPatterns => f.patterns.repeating_patterns,
            ThresholdKey::SharpEdges => f.patterns.sharp_edges,
            ThresholdKey::Uniformity => f.textures.uniformity,
            ThresholdKey::UnnaturalGradients => f.textures.unnatural_gradients,
            ThresholdKey::Complexity => f.textures.complexity,
            ThresholdKey::ColorBanding => f.colors.color_banding,
            ThresholdKey::UniqueColors => f.colors.unique_colors as f64,
            ThresholdKey::SaturationVariance => f.colors.saturation_variance,
            ThresholdKey::HorizontalSymmetry => f.symmetry.horizontal_symmetry,
            ThresholdKey::VerticalSymmetry => f.symmetry.vertical_symmetry,
            ThresholdKey::ArtificialNoise => f.noise.artificial_noise,
            ThresholdKey::NaturalNoise => f.noise.natural_noise,
            ThresholdKey::CompressionArtifacts => f.artifacts.compression_artifacts,
            ThresholdKey::PerfectEdges => f.artifacts.perfect_edges,
        }
    }
}

impl std::fmt::Display for ThresholdKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.category().name(), self.schema_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatternThresholds {
    pub repeating_patterns: f64,
    pub sharp_edges: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextureThresholds {
    pub uniformity: f64,
    pub unnatural_gradients: f64,
    pub complexity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorThresholds {
    pub color_banding: f64,
    pub unique_colors: f64,
    pub saturation_variance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SymmetryThresholds {
    pub horizontal_threshold: f64,
    pub vertical_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoiseThresholds {
    pub artificial_noise_threshold: f64,
    pub natural_noise_threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArtifactThresholds {
    pub compression_artifacts: f64,
    pub perfect_edges: f64,
}

/// Complete threshold set, one scalar per [`ThresholdKey`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    pub patterns: PatternThresholds,
    pub textures: TextureThresholds,
    pub colors: ColorThresholds,
    pub symmetry: SymmetryThresholds,
    pub noise: NoiseThresholds,
    pub artifacts: ArtifactThresholds,
}

impl Default for ThresholdConfig {
    /// Baseline observed between synthetic and authentic photo sets
    fn default() -> Self {
        Self {
            patterns: PatternThresholds {
                repeating_patterns: 0.45,
                sharp_edges: 0.06,
            },
            textures: TextureThresholds {
                uniformity: 0.60,
                unnatural_gradients: 0.25,
                complexity: 0.15,
            },
            colors: ColorThresholds {
                color_banding: 0.22,
                unique_colors: 3500.0,
                saturation_variance: 0.04,
            },
            symmetry: SymmetryThresholds {
                horizontal_threshold: 0.85,
                vertical_threshold: 0.85,
            },
            noise: NoiseThresholds {
                artificial_noise_threshold: 0.35,
                natural_noise_threshold: 0.03,
            },
            artifacts: ArtifactThresholds {
                compression_artifacts: 0.35,
                perfect_edges: 0.25,
            },
        }
    }
}

impl ThresholdConfig {
    pub fn get(&self, key: ThresholdKey) -> f64 {
        match key {
            ThresholdKey::RepeatingPatterns => self.patterns.repeating_patterns,
            ThresholdKey::SharpEdges => self.patterns.sharp_edges,
            ThresholdKey::Uniformity => self.textures.uniformity,
            ThresholdKey::UnnaturalGradients => self.textures.unnatural_gradients,
            ThresholdKey::Complexity => self.textures.complexity,
            ThresholdKey::ColorBanding => self.colors.color_banding,
            ThresholdKey::UniqueColors => self.colors.unique_colors,
            ThresholdKey::SaturationVariance => self.colors.saturation_variance,
            ThresholdKey::HorizontalSymmetry => self.symmetry.horizontal_threshold,
            ThresholdKey::VerticalSymmetry => self.symmetry.vertical_threshold,
            ThresholdKey::ArtificialNoise => self.noise.artificial_noise_threshold,
            ThresholdKey::NaturalNoise => self.noise.natural_noise_threshold,
            ThresholdKey::CompressionArtifacts => self.artifacts.compression_artifacts,
            ThresholdKey::PerfectEdges => self.artifacts.perfect_edges,
        }
    }

    pub fn set(&mut self, key: ThresholdKey, value: f64) {
        let slot = match key {
            ThresholdKey::RepeatingPatterns => &mut self.patterns.repeating_patterns,
            ThresholdKey::SharpEdges => &mut self.patterns.sharp_edges,
            ThresholdKey::Uniformity => &mut self.textures.uniformity,
            ThresholdKey::UnnaturalGradients => &mut self.textures.unnatural_gradients,
            ThresholdKey::Complexity => &mut self.textures.complexity,
            ThresholdKey::ColorBanding => &mut self.colors.color_banding,
            ThresholdKey::UniqueColors => &mut self.colors.unique_colors,
            ThresholdKey::SaturationVariance => &mut self.colors.saturation_variance,
            ThresholdKey::HorizontalSymmetry => &mut self.symmetry.horizontal_threshold,
            ThresholdKey::VerticalSymmetry => &mut self.symmetry.vertical_threshold,
            ThresholdKey::ArtificialNoise => &mut self.noise.artificial_noise_threshold,
            ThresholdKey::NaturalNoise => &mut self.noise.natural_noise_threshold,
            ThresholdKey::CompressionArtifacts => &mut self.artifacts.compression_artifacts,
            ThresholdKey::PerfectEdges => &mut self.artifacts.perfect_edges,
        };
        *slot = value;
    }

    /// Iterate `(key, value)` pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (ThresholdKey, f64)> + '_ {
        ThresholdKey::all().iter().map(move |&k| (k, self.get(k)))
    }

    /// Reject any non-finite threshold
    pub fn validate(&self) -> Result<()> {
        match self.iter().find(|(_, v)| !v.is_finite()) {
            Some((key, value)) => Err(DetectError::MalformedModel(format!(
                "threshold {} is not a finite number ({})",
                key, value
            ))),
            None => Ok(()),
        }
    }
}
