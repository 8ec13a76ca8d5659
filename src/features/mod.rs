//! Pixel feature extraction
//!
//! Six independent analyzers, each a pure reduction over a [`PixelSample`]:
//!
//! - **pattern**: sharp horizontal edges, repeating 8×8 tiles
//! - **texture**: local uniformity, complexity, unnatural gradients
//! - **color**: quantized palette size, saturation statistics, banding
//! - **symmetry**: left/right and top/bottom mirror agreement
//! - **noise**: natural vs. artificial local variation
//! - **artifact**: blockiness and perfect edges
//!
//! Color distance everywhere is the L1 sum over R, G, B; alpha is ignored.
//! Neighborhood-based analyzers only visit interior pixels and take the
//! four neighbors in N, S, W, E order.

mod artifact;
mod color;
mod noise;
mod pattern;
mod symmetry;
mod texture;

pub use artifact::ArtifactMetrics;
pub use color::ColorMetrics;
pub use noise::NoiseMetrics;
pub use pattern::PatternMetrics;
pub use symmetry::SymmetryMetrics;
pub use texture::TextureMetrics;

use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// All metrics computed for one image
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeatureVector {
    pub patterns: PatternMetrics,
    pub textures: TextureMetrics,
    pub colors: ColorMetrics,
    pub symmetry: SymmetryMetrics,
    pub noise: NoiseMetrics,
    pub artifacts: ArtifactMetrics,
}

/// Number of scalar metrics in a [`FeatureVector`]
pub const METRIC_COUNT: usize = 15;

impl FeatureVector {
    /// Every metric as a `category.metric` path and its value
    pub fn metrics(&self) -> [(&'static str, f64); METRIC_COUNT] {
        [
            ("patterns.repeatingPatterns", self.patterns.repeating_patterns),
            ("patterns.sharpEdges", self.patterns.sharp_edges),
            ("textures.uniformity", self.textures.uniformity),
            ("textures.unnaturalGradients", self.textures.unnatural_gradients),
            ("textures.complexity", self.textures.complexity),
            ("colors.colorBanding", self.colors.color_banding),
            ("colors.uniqueColors", self.colors.unique_colors as f64),
            ("colors.averageSaturation", self.colors.average_saturation),
            ("colors.saturationVariance", self.colors.saturation_variance),
            ("symmetry.horizontalSymmetry", self.symmetry.horizontal_symmetry),
            ("symmetry.verticalSymmetry", self.symmetry.vertical_symmetry),
            ("noise.artificialNoise", self.noise.artificial_noise),
            ("noise.naturalNoise", self.noise.natural_noise),
            ("artifacts.compressionArtifacts", self.artifacts.compression_artifacts),
            ("artifacts.perfectEdges", self.artifacts.perfect_edges),
        ]
    }
}

/// Run all six analyzers over a sample.
///
/// The analyzers share nothing, so they run concurrently on the rayon pool.
pub fn extract(sample: &PixelSample) -> FeatureVector {
    let ((patterns, textures), ((colors, symmetry), (noise, artifacts))) = rayon::join(
        || rayon::join(|| pattern::analyze(sample), || texture::analyze(sample)),
        || {
            rayon::join(
                || rayon::join(|| color::analyze(sample), || symmetry::analyze(sample)),
                || rayon::join(|| noise::analyze(sample), || artifact::analyze(sample)),
            )
        },
    );

    let features = FeatureVector {
        patterns,
        textures,
        colors,
        symmetry,
        noise,
        artifacts,
    };
    debug!(
        "Extracted features for {}x{}: sharp_edges={:.3}, uniformity={:.3}, unique_colors={}",
        sample.width(),
        sample.height(),
        features.patterns.sharp_edges,
        features.textures.uniformity,
        features.colors.unique_colors
    );
    features
}

/// L1 distance over R, G, B
#[inline]
pub(crate) fn color_distance(a: [u8; 3], b: [u8; 3]) -> u32 {
    a.iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as i32 - y as i32).unsigned_abs())
        .sum()
}

/// Pack a color into 15 bits after reducing each channel to 32 levels
#[inline]
pub(crate) fn quantize(rgb: [u8; 3]) -> u16 {
    ((rgb[0] >> 3) as u16) << 10 | ((rgb[1] >> 3) as u16) << 5 | (rgb[2] >> 3) as u16
}

/// Number of distinct values [`quantize`] can produce
pub(crate) const QUANTIZED_LEVELS: usize = 1 << 15;

/// Distances from every interior pixel to its N, S, W, E neighbors
pub(crate) fn interior_distances(sample: &PixelSample) -> impl Iterator<Item = [u32; 4]> + '_ {
    let (width, height) = (sample.width(), sample.height());
    (1..height - 1).flat_map(move |y| {
        (1..width - 1).map(move |x| {
            let center = sample.rgb(x, y);
            [
                color_distance(center, sample.rgb(x, y - 1)),
                color_distance(center, sample.rgb(x, y + 1)),
                color_distance(center, sample.rgb(x - 1, y)),
                color_distance(center, sample.rgb(x + 1, y)),
            ]
        })
    })
}

/// Number of interior pixels, `(w - 2) * (h - 2)`
pub(crate) fn interior_count(sample: &PixelSample) -> usize {
    (sample.width() as usize - 2) * (sample.height() as usize - 2)
}

#[inline]
pub(crate) fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Synthetic images for analyzer and scoring tests
#[cfg(test)]
pub(crate) mod test_support {
    use crate::sample::PixelSample;

    /// Build a sample from a per-pixel color function
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) -> PixelSample {
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let [r, g, b] = f(x, y);
                pixels.extend_from_slice(&[r, g, b, 255]);
            }
        }
        PixelSample::new(width, height, pixels).expect("valid test sample")
    }

    pub fn solid(width: u32, height: u32, rgb: [u8; 3]) -> PixelSample {
        from_fn(width, height, |_, _| rgb)
    }

    /// Black and white alternating every pixel
    pub fn checkerboard(width: u32, height: u32) -> PixelSample {
        from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                [0, 0, 0]
            } else {
                [255, 255, 255]
            }
        })
    }

    /// Deterministic pseudo-random noise (xorshift), seeded per test
    pub fn noisy(width: u32, height: u32, seed: u32) -> PixelSample {
        let mut state = seed.max(1);
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state
        };
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for _ in 0..(width * height) {
            let v = next();
            pixels.extend_from_slice(&[v as u8, (v >> 8) as u8, (v >> 16) as u8, 255]);
        }
        PixelSample::new(width, height, pixels).expect("valid test sample")
    }
}
