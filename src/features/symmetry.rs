//! Mirror symmetry about the vertical and horizontal center lines

use super::{color_distance, fraction};
use crate::sample::PixelSample;
use serde::{Deserialize, Serialize};

/// Mirrored pixels closer than this are considered equal
const MIRROR_MAX_DISTANCE: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SymmetryMetrics {
    /// Left-half pixels matching their mirror across the vertical center line
    pub horizontal_symmetry: f64,
    /// Top-half pixels matching their mirror across the horizontal center line
    pub vertical_symmetry: f64,
}

pub(super) fn analyze(sample: &PixelSample) -> SymmetryMetrics {
    let (width, height) = (sample.width(), sample.height());
    let (half_w, half_h) = (width / 2, height / 2);

    let mut horizontal = 0;
    for y in 0..height {
        for x in 0..half_w {
            let mirrored = sample.rgb(width - 1 - x, y);
            if color_distance(sample.rgb(x, y), mirrored) < MIRROR_MAX_DISTANCE {
                horizontal += 1;
            }
        }
    }

    let mut vertical = 0;
    for y in 0..half_h {
        for x in 0..width {
            let mirrored = sample.rgb(x, height - 1 - y);
            if color_distance(sample.rgb(x, y), mirrored) < MIRROR_MAX_DISTANCE {
                vertical += 1;
            }
        }
    }

    SymmetryMetrics {
        horizontal_symmetry: fraction(horizontal, half_w as usize * height as usize),
        vertical_symmetry: fraction(vertical, width as usize * half_h as usize),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[test]
    fn test_mirrored_content_is_fully_symmetric() {
        // arbitrary content on the left, reflected onto the right
        let base = noisy(64, 57, 99);
        let mirrored = from_fn(64, 57, |x, y| {
            let sx = if x < 32 { x } else { 63 - x };
            base.rgb(sx, y)
        });
        let m = analyze(&mirrored);
        assert_eq!(m.horizontal_symmetry, 1.0);
    }

    #[test]
    fn test_odd_width_mirror() {
        let base = noisy(51, 50, 5);
        let mirrored = from_fn(51, 50, |x, y| base.rgb(x.min(50 - x), y));
        assert_eq!(analyze(&mirrored).horizontal_symmetry, 1.0);
    }

    #[test]
    fn test_checkerboard_has_no_mirror_symmetry() {
        // even sides: x and w-1-x always have opposite parity
        let m = analyze(&checkerboard(64, 64));
        assert_eq!(m.horizontal_symmetry, 0.0);
        assert_eq!(m.vertical_symmetry, 0.0);
    }

    #[test]
    fn test_top_bottom_split() {
        let m = analyze(&from_fn(50, 50, |_, y| if y < 25 { [0, 0, 0] } else { [200, 200, 200] }));
        assert_eq!(m.vertical_symmetry, 0.0);
        assert_eq!(m.horizontal_symmetry, 1.0);
    }
}
