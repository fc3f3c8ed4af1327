//! CLI command implementations

pub mod blur;
pub mod compare;
pub mod contrast;
pub mod equalize;
pub mod info;
pub mod pipeline;

use anyhow::{Context, Result};
use pxl_core::PixelBuffer;
use std::path::Path;
use tracing::debug;

/// Load image from path as 8-bit RGBA.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?
        .into_rgba8();
    let (width, height) = decoded.dimensions();
    debug!(path = %path.display(), width, height, "loaded image");

    PixelBuffer::from_rgba_bytes(width, height, decoded.as_raw())
        .with_context(|| format!("Invalid image: {}", path.display()))
}

/// Save image to path. The format follows the file extension.
pub fn save_image(path: &Path, buf: &PixelBuffer) -> Result<()> {
    let (width, height) = buf.dimensions();
    let encoded = image::RgbaImage::from_raw(width, height, buf.to_rgba_bytes())
        .context("Pixel data does not match image dimensions")?;
    encoded
        .save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))?;
    debug!(path = %path.display(), width, height, "saved image");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxl_core::Rgba;

    #[test]
    fn test_png_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rt.png");

        let pixels = vec![
            Rgba::new(255, 0, 0, 255),
            Rgba::new(0, 255, 0, 128),
            Rgba::new(0, 0, 255, 0),
            Rgba::gray(77),
            Rgba::gray(0),
            Rgba::gray(255),
        ];
        let buf = PixelBuffer::from_pixels(3, 2, pixels).unwrap();
        save_image(&path, &buf).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, buf);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_image(&dir.path().join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
