//! Palette size, saturation statistics and banding

use super::{color_distance, fraction, quantize, QUANTIZED_LEVELS};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

/// Raster neighbors closer than this (but not identical) count as banding
const BANDING_MAX_DISTANCE: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorMetrics {
    /// Distinct colors after reducing each channel to 32 levels
    pub unique_colors: u32,
    pub average_saturation: f64,
    /// Population variance of per-pixel saturation
    pub saturation_variance: f64,
    /// Raster-order pixels differing from their predecessor by 1..=4
    pub color_banding: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> ColorMetrics {
    let mut seen = vec![0u64; QUANTIZED_LEVELS / 64];
    let mut unique_colors = 0u32;
    let mut saturation = Welford::default();
    let mut banding = 0;
    let mut prev: Option<[u8; 3]> = None;

    for rgb in sample.rgb_iter() {
        let q = quantize(rgb) as usize;
        let (word, bit) = (q / 64, 1u64 << (q % 64));
        if seen[word] & bit == 0 {
            seen[word] |= bit;
            unique_colors += 1;
        }

        saturation.push(saturation_of(rgb));

        if let Some(p) = prev {
            let d = color_distance(p, rgb);
            if d > 0 && d < BANDING_MAX_DISTANCE {
                banding += 1;
            }
        }
        prev = Some(rgb);
    }

    ColorMetrics {
        unique_colors,
        average_saturation: saturation.mean,
        saturation_variance: saturation.variance(),
        color_banding: fraction(banding, sample.pixel_count() - 1),
    }
}

/// HSV-style saturation: (max - min) / max, 0 for black
fn saturation_of([r, g, b]: [u8; 3]) -> f64 {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if max == 0 {
        0.0
    } else {
        (max - min) as f64 / max as f64
    }
}

/// Single-pass mean / population variance
#[derive(Debug, Default)]
struct Welford {
    count: u64,
    mean: f64,
    m2: f64,
}

impl Welford {
    fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn variance(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.m2 / self.count as f64).max(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_uniform_single_color() {
        let m = analyze(&solid(50, 50, [128, 128, 128]));
        assert_eq!(m.unique_colors, 1);
        assert_eq!(m.average_saturation, 0.0);
        assert_eq!(m.saturation_variance, 0.0);
        assert_eq!(m.color_banding, 0.0);
    }

    #[test]
    fn test_saturation() {
        assert_eq!(saturation_of([0, 0, 0]), 0.0);
        assert_eq!(saturation_of([255, 0, 0]), 1.0);
        assert!((saturation_of([200, 100, 100]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_half_saturated_variance() {
        // half pure red (s=1), half gray (s=0): mean 0.5, variance 0.25
        let m = analyze(&from_fn(50, 50, |x, _| if x < 25 { [255, 0, 0] } else { [80, 80, 80] }));
        assert!((m.average_saturation - 0.5).abs() < 1e-9);
        assert!((m.saturation_variance - 0.25).abs() < 1e-9);
        assert_eq!(m.unique_colors, 2);
    }

    #[test]
    fn test_banding_on_slow_ramp() {
        // red climbs by one per pixel in raster order (wrapping at 256)
        let m = analyze(&from_fn(50, 50, |x, y| [((y * 50 + x) % 256) as u8, 0, 0]));
        // every step is 1 except the 255 -> 0 wraps
        let wraps = (50 * 50 - 1) / 256;
        let expected = (50 * 50 - 1 - wraps) as f64 / (50 * 50 - 1) as f64;
        assert!((m.color_banding - expected).abs() < 1e-12);
    }

    #[test]
    fn test_welford_matches_two_pass() {
        let values = [0.1, 0.4, 0.4, 0.9, 0.0, 0.33];
        let mut w = Welford::default();
        values.iter().for_each(|&v| w.push(v));
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        assert!((w.mean - mean).abs() < 1e-12);
        assert!((w.variance() - var).abs() < 1e-12);
    }
}
