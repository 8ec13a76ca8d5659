//! Sharp edges and repeating tiles

use super::{color_distance, fraction, quantize};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

/// Distance above which two horizontal neighbors form a sharp edge
const SHARP_EDGE_DISTANCE: u32 = 100;
/// Tile side for repetition analysis
const TILE: u32 = 8;
/// A tile with fewer distinct quantized colors than this counts as repeating
const REPEATING_MAX_DISTINCT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatternMetrics {
    /// Fraction of horizontally-adjacent pairs with distance > 100
    pub sharp_edges: f64,
    /// Fraction of full 8×8 tiles with fewer than 32 distinct quantized colors
    pub repeating_patterns: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> PatternMetrics {
    PatternMetrics {
        sharp_edges: sharp_edges(sample),
        repeating_patterns: repeating_patterns(sample),
    }
}

fn sharp_edges(sample: &PixelSample) -> f64 {
    let (width, height) = (sample.width(), sample.height());
    let mut edges = 0;
    for y in 0..height {
        let mut prev = sample.rgb(0, y);
        for x in 1..width {
            let cur = sample.rgb(x, y);
            if color_distance(prev, cur) > SHARP_EDGE_DISTANCE {
                edges += 1;
            }
            prev = cur;
        }
    }
    fraction(edges, (width as usize - 1) * height as usize)
}

fn repeating_patterns(sample: &PixelSample) -> f64 {
    let tiles_x = sample.width() / TILE;
    let tiles_y = sample.height() / TILE;
    let mut repeating = 0;
    let mut tile = [0u16; (TILE * TILE) as usize];

    for ty in 0..tiles_y {
        for tx in 0..tiles_x {
            for dy in 0..TILE {
                for dx in 0..TILE {
                    let rgb = sample.rgb(tx * TILE + dx, ty * TILE + dy);
                    tile[(dy * TILE + dx) as usize] = quantize(rgb);
                }
            }
            tile.sort_unstable();
            let distinct = 1 + tile.windows(2).filter(|w| w[0] != w[1]).count();
            if distinct < REPEATING_MAX_DISTINCT {
                repeating += 1;
            }
        }
    }

    fraction(repeating, tiles_x as usize * tiles_y as usize)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_checkerboard_is_all_edges() {
        let m = analyze(&checkerboard(64, 64));
        assert_eq!(m.sharp_edges, 1.0);
        // two colors per tile
        assert_eq!(m.repeating_patterns, 1.0);
    }

    #[test]
    fn test_uniform_has_no_edges() {
        let m = analyze(&solid(64, 64, [90, 90, 90]));
        assert_eq!(m.sharp_edges, 0.0);
        assert_eq!(m.repeating_patterns, 1.0);
    }

    #[test]
    fn test_single_vertical_edge() {
        // left half black, right half white: one edge per row
        let sample = from_fn(50, 50, |x, _| if x < 25 { [0, 0, 0] } else { [255, 255, 255] });
        let m = analyze(&sample);
        assert!((m.sharp_edges - 1.0 / 49.0).abs() < 1e-12);
    }

    #[test]
    fn test_rich_tiles_do_not_repeat() {
        // every pixel in a tile gets its own quantized color
        let sample = from_fn(64, 64, |x, y| [((x % 8) * 32) as u8, ((y % 8) * 32) as u8, 0]);
        let m = analyze(&sample);
        assert_eq!(m.repeating_patterns, 0.0);
    }

    #[test]
    fn test_partial_tiles_are_ignored() {
        // 50x50 holds 6x6 full tiles; the ragged border must not skew the ratio
        let m = analyze(&solid(50, 50, [0, 0, 0]));
        assert_eq!(m.repeating_patterns, 1.0);
    }
}
