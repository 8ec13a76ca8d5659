//! Decode image files into pixel samples

use crate::error::Result;
use crate::sample::PixelSample;
use image::{ImageReader, RgbaImage};
use std::path::Path;
use tracing::debug;

/// File extensions the CLI picks up when given a directory
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Decode any supported image and convert it to RGBA8.
///
/// The format is sniffed from the file content, not the extension. Open
/// failures are `Io`, undecodable content is `Decode`, and images outside
/// the accepted size range fail validation like any other sample.
pub fn load_sample(path: &Path) -> Result<PixelSample> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    debug!("Decoded {} ({}x{})", path.display(), img.width(), img.height());
    from_rgba(img.to_rgba8())
}

pub fn from_rgba(img: RgbaImage) -> Result<PixelSample> {
    let (width, height) = img.dimensions();
    PixelSample::new(width, height, img.into_raw())
}
