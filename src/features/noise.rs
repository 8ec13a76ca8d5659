//! Natural sensor-like noise vs. synthetic noise

use super::{fraction, interior_count, interior_distances};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

const NATURAL_MAX: u32 = 30;
const NATURAL_MIN: u32 = 5;
const UNIFORM_SPREAD: u32 = 2;
const EXTREME_JUMP: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NoiseMetrics {
    /// Interior pixels with small but non-zero variation on every side
    pub natural_noise: f64,
    /// Interior pixels with suspiciously even variation or an extreme jump
    pub artificial_noise: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> NoiseMetrics {
    let (mut natural, mut artificial) = (0, 0);

    for distances in interior_distances(sample) {
        let max = distances.iter().copied().max().unwrap_or(0);
        let min = distances.iter().copied().min().unwrap_or(0);

        // a pixel is classified at most once; natural wins
        if max < NATURAL_MAX && min > NATURAL_MIN {
            natural += 1;
        } else if max - min <= UNIFORM_SPREAD || max > EXTREME_JUMP {
            artificial += 1;
        }
    }

    let total = interior_count(sample);
    NoiseMetrics {
        natural_noise: fraction(natural, total),
        artificial_noise: fraction(artificial, total),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_flat_image_is_artificial() {
        let m = analyze(&solid(50, 50, [40, 40, 40]));
        assert_eq!(m.natural_noise, 0.0);
        assert_eq!(m.artificial_noise, 1.0);
    }

    #[test]
    fn test_checkerboard_jumps_are_artificial() {
        let m = analyze(&checkerboard(50, 50));
        assert_eq!(m.artificial_noise, 1.0);
    }

    #[test]
    fn test_gentle_variation_is_natural() {
        // column steps of 7, row steps of 9; only pixels next to the u8 wrap differ
        let m = analyze(&from_fn(50, 50, |x, y| [(x * 7) as u8, (y * 9) as u8, 0]));
        assert!(m.natural_noise > 0.5);
        assert!(m.natural_noise + m.artificial_noise <= 1.0);
    }

    #[test]
    fn test_fractions_never_overlap() {
        let m = analyze(&noisy(80, 60, 3));
        assert!(m.natural_noise + m.artificial_noise <= 1.0 + 1e-12);
    }
}
