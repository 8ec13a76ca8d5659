//! Compression blockiness and perfectly regular edges

use super::{fraction, interior_count, interior_distances};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

const BLOCK_JUMP: u32 = 100;
const BLOCK_MIN_NEIGHBORS: usize = 3;
const PERFECT_JUMP: u32 = 200;
const PERFECT_MIN_PAIRS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ArtifactMetrics {
    /// Interior pixels where most neighbors are identical or far apart
    pub compression_artifacts: f64,
    /// Interior pixels whose neighbor distances step in perfectly even or extreme jumps
    pub perfect_edges: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> ArtifactMetrics {
    let (mut blocky, mut perfect) = (0, 0);

    for distances in interior_distances(sample) {
        let hard = distances
            .iter()
            .filter(|&&d| d == 0 || d > BLOCK_JUMP)
            .count();
        if hard >= BLOCK_MIN_NEIGHBORS {
            blocky += 1;
        }

        let even_steps = distances
            .windows(2)
            .map(|w| w[0].abs_diff(w[1]))
            .filter(|&step| step == 0 || step > PERFECT_JUMP)
            .count();
        if even_steps >= PERFECT_MIN_PAIRS {
            perfect += 1;
        }
    }

    let total = interior_count(sample);
    ArtifactMetrics {
        compression_artifacts: fraction(blocky, total),
        perfect_edges: fraction(perfect, total),
    }
}
