//! Icon loading for the form preview.
//!
//! A chosen icon must decode as an image; the preview is a PNG scaled to fit
//! [`PREVIEW_SIZE`]. Launchers without an icon get a generated placeholder.

use ::image::{ImageBuffer, ImageFormat, Rgb, codecs::png::PngEncoder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::Cursor;
use std::path::Path;

use crate::error::{Error, Result};
use crate::logs;

pub const PREVIEW_SIZE: u32 = 128;

const PLACEHOLDER_SIZE: u32 = 64;
const PLACEHOLDER_BLOCK: u32 = 8;

/// A decoded icon ready for display.
#[derive(Debug, Clone)]
pub struct IconPreview {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded preview.
    pub png: Vec<u8>,
}

/// Decode `path` and produce a preview scaled to fit, keeping aspect ratio.
pub fn load_icon(path: &Path) -> Result<IconPreview> {
    let decode_error = |source| Error::IconDecode {
        path: path.to_path_buf(),
        source,
    };

    let img = ::image::open(path).map_err(decode_error)?;
    let preview = img.thumbnail(PREVIEW_SIZE, PREVIEW_SIZE);

    let mut png = Vec::new();
    preview
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(decode_error)?;

    logs::log_debug(&format!(
        "Loaded icon {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    ));

    Ok(IconPreview {
        width: preview.width(),
        height: preview.height(),
        png,
    })
}

/// Deterministic pixelated placeholder derived from the launcher name.
pub fn placeholder_icon(name: &str) -> Vec<u8> {
    let base_seed = name.chars().map(|c| c as u64).sum::<u64>();
    let mut img = ImageBuffer::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE);

    for y in 0..PLACEHOLDER_SIZE {
        for x in 0..PLACEHOLDER_SIZE {
            let block_seed = (x / PLACEHOLDER_BLOCK) * PLACEHOLDER_BLOCK + y / PLACEHOLDER_BLOCK;
            let mut block_rng = ChaCha8Rng::seed_from_u64(base_seed + block_seed as u64);

            let intensity = if block_rng.r#gen::<f32>() > 0.5 {
                200u8
            } else {
                50u8
            };

            img.put_pixel(x, y, Rgb([intensity, intensity, intensity]));
        }
    }

    let mut bytes = Vec::new();
    let encoder = PngEncoder::new(&mut bytes);
    img.write_with_encoder(encoder).unwrap_or_else(|_| {
        logs::log_error("Failed to encode placeholder icon");
    });

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::RgbaImage;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_png_icon_is_scaled() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.png");
        RgbaImage::new(512, 256).save(&path).unwrap();

        let preview = load_icon(&path).unwrap();

        assert_eq!((preview.width, preview.height), (128, 64));
        assert!(::image::load_from_memory(&preview.png).is_ok());
    }

    #[test]
    fn test_small_icon_keeps_size() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("small.jpg");
        ::image::RgbImage::new(32, 32).save(&path).unwrap();

        let preview = load_icon(&path).unwrap();
        assert!(preview.width <= PREVIEW_SIZE && preview.height <= PREVIEW_SIZE);
    }

    #[test]
    fn test_garbage_icon_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"\x89PNG\r\n\x1a\nthis is not a png").unwrap();

        assert!(matches!(load_icon(&path), Err(Error::IconDecode { .. })));
    }

    #[test]
    fn test_missing_icon_is_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = load_icon(&temp_dir.path().join("missing.png"));
        assert!(matches!(result, Err(Error::IconDecode { .. })));
    }

    #[test]
    fn test_placeholder_is_deterministic_png() {
        let first = placeholder_icon("Foo");
        assert_eq!(first, placeholder_icon("Foo"));

        let decoded = ::image::load_from_memory(&first).unwrap();
        assert_eq!(decoded.width(), PLACEHOLDER_SIZE);
    }
}
