//! Validated RGBA pixel buffers
//!
//! A [`PixelSample`] is the only input the analyzers accept. Construction
//! validates dimensions and buffer length up front so no analyzer ever has
//! to bounds-check.

use crate::error::{DetectError, Result};

/// Smallest accepted side length in pixels
pub const MIN_DIMENSION: u32 = 50;
/// Largest accepted side length in pixels
pub const MAX_DIMENSION: u32 = 4096;
/// Bytes per pixel (R, G, B, A)
pub const CHANNELS: usize = 4;

/// An immutable, validated width×height RGBA buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSample {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl PixelSample {
    /// Validate and wrap a buffer of interleaved R,G,B,A bytes
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        Self::validate(width, height, Some(&pixels))?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Check a candidate sample without constructing it.
    ///
    /// # Errors
    ///
    /// - `InvalidSample` if the buffer is absent or a dimension is zero
    /// - `InvalidDimensions` if a side lies outside [50, 4096]
    /// - `CorruptBuffer` if the buffer length is not `width * height * 4`
    pub fn validate(width: u32, height: u32, pixels: Option<&[u8]>) -> Result<()> {
        let pixels =
            pixels.ok_or_else(|| DetectError::InvalidSample("pixel buffer is missing".into()))?;

        if width == 0 || height == 0 {
            return Err(DetectError::InvalidSample(format!(
                "empty image ({}x{})",
                width, height
            )));
        }

        let in_range = |side: u32| (MIN_DIMENSION..=MAX_DIMENSION).contains(&side);
        if !in_range(width) || !in_range(height) {
            return Err(DetectError::InvalidDimensions {
                width,
                height,
                min: MIN_DIMENSION,
                max: MAX_DIMENSION,
            });
        }

        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(DetectError::CorruptBuffer {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw interleaved RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// RGB of the pixel at (x, y). Alpha is never used by the analyzers.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// RGB of the pixel at raster index `i`
    #[inline]
    pub fn rgb_at(&self, i: usize) -> [u8; 3] {
        let o = i * CHANNELS;
        [self.pixels[o], self.pixels[o + 1], self.pixels[o + 2]]
    }

    /// Iterate RGB triples in raster order
    pub fn rgb_iter(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|p| [p[0], p[1], p[2]])
    }
}
