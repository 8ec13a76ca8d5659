//! Local texture statistics over 4-neighborhoods

use super::{fraction, interior_count, interior_distances};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

const UNIFORM_MAX_SUM: u32 = 50;
const COMPLEX_MIN_SUM: u32 = 200;
const GRADIENT_STEP_MAX: u32 = 10;
const GRADIENT_MIN_NEIGHBORS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TextureMetrics {
    /// Interior pixels whose neighbor distances sum below 50
    pub uniformity: f64,
    /// Interior pixels whose neighbor distances sum above 200
    pub complexity: f64,
    /// Interior pixels with at least 3 tiny, non-zero neighbor steps
    pub unnatural_gradients: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> TextureMetrics {
    let (mut uniform, mut complex, mut gradients) = (0, 0, 0);

    for distances in interior_distances(sample) {
        let sum: u32 = distances.iter().sum();
        if sum < UNIFORM_MAX_SUM {
            uniform += 1;
        }
        if sum > COMPLEX_MIN_SUM {
            complex += 1;
        }
        let soft_steps = distances
            .iter()
            .filter(|&&d| d > 0 && d < GRADIENT_STEP_MAX)
            .count();
        if soft_steps >= GRADIENT_MIN_NEIGHBORS {
            gradients += 1;
        }
    }

    let total = interior_count(sample);
    TextureMetrics {
        uniformity: fraction(uniform, total),
        complexity: fraction(complex, total),
        unnatural_gradients: fraction(gradients, total),
    }
}
