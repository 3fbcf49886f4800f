//! Bitmap scaling — metadata-only bounds queries and a two-pass resize.
//!
//! The scaling pipeline mirrors a memory-bounded decoder: a power-of-two
//! subsampling pass first shrinks the decoded image cheaply, then a smoothed
//! resample produces exactly the requested dimensions.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{ImageReader, RgbaImage};

use crate::assets::AssetError;

/// Decode only the image header and return its natural `(width, height)`.
///
/// No pixel data is allocated.
pub fn dimensions(bytes: &[u8]) -> Result<(u32, u32), AssetError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    Ok(reader.into_dimensions()?)
}

/// Largest power of two `s` such that half the natural size, divided by `s`,
/// still covers the target on both axes. `1` when the image is not strictly
/// larger than the target.
fn sample_size(natural: (u32, u32), target: (u32, u32)) -> u32 {
    let (natural_w, natural_h) = natural;
    let (target_w, target_h) = target;
    if target_w == 0 || target_h == 0 {
        return 1;
    }

    let mut size = 1u32;
    if natural_w > target_w || natural_h > target_h {
        let half_w = natural_w / 2;
        let half_h = natural_h / 2;

        while half_w / size >= target_w && half_h / size >= target_h {
            size *= 2;
        }
    }
    size
}

/// Decode `bytes` and scale to exactly `(target_w, target_h)` pixels.
///
/// Oversized sources are first reduced by the power-of-two
/// [`sample_size`] factor with a cheap nearest-neighbor pass, then resampled
/// smoothed (triangle filter) to the exact target. Zero target dimensions
/// yield an empty image (degenerate view, not an error).
pub fn load_scaled(bytes: &[u8], target_w: u32, target_h: u32) -> Result<RgbaImage, AssetError> {
    if target_w == 0 || target_h == 0 {
        return Ok(RgbaImage::new(target_w, target_h));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    let decoded = reader.decode()?.into_rgba8();
    let natural = decoded.dimensions();

    let sample = sample_size(natural, (target_w, target_h));
    let reduced = if sample > 1 {
        image::imageops::resize(
            &decoded,
            (natural.0 / sample).max(1),
            (natural.1 / sample).max(1),
            FilterType::Nearest,
        )
    } else {
        decoded
    };

    Ok(image::imageops::resize(
        &reduced,
        target_w,
        target_h,
        FilterType::Triangle,
    ))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::{dimensions, load_scaled, sample_size};

    use image::{Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encode a solid-color PNG in memory; tests never need binary fixtures.
    fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn dimensions_reads_bounds() {
        let bytes = png_bytes(123, 45, [10, 20, 30, 255]);
        assert_eq!(dimensions(&bytes).unwrap(), (123, 45));
    }

    #[test]
    fn dimensions_rejects_garbage() {
        assert!(dimensions(&[0u8; 16]).is_err());
    }

    #[test]
    fn sample_size_is_one_for_small_sources() {
        assert_eq!(sample_size((100, 100), (100, 100)), 1);
        assert_eq!(sample_size((50, 50), (100, 100)), 1);
    }

    #[test]
    fn sample_size_grows_by_powers_of_two() {
        // halves = 500; 500/1, 500/2, 500/4 all cover 100, 500/8 does not.
        assert_eq!(sample_size((1000, 1000), (100, 100)), 8);
        // Limited by the tighter axis: halves = (500, 150), and 150/2 < 100.
        assert_eq!(sample_size((1000, 300), (100, 100)), 2);
        assert_eq!(sample_size((1000, 800), (100, 100)), 8);
    }

    #[test]
    fn load_scaled_output_is_exact() {
        let bytes = png_bytes(640, 480, [200, 100, 50, 255]);
        for (w, h) in [(64, 48), (100, 100), (7, 3), (640, 480), (1000, 20)] {
            let scaled = load_scaled(&bytes, w, h).unwrap();
            assert_eq!(scaled.dimensions(), (w, h));
        }
    }

    #[test]
    fn load_scaled_preserves_solid_color() {
        let bytes = png_bytes(512, 512, [10, 200, 30, 255]);
        let scaled = load_scaled(&bytes, 40, 40).unwrap();
        assert_eq!(scaled.get_pixel(20, 20).0, [10, 200, 30, 255]);
    }

    #[test]
    fn load_scaled_zero_target_is_empty() {
        let bytes = png_bytes(64, 64, [1, 2, 3, 255]);
        let scaled = load_scaled(&bytes, 0, 10).unwrap();
        assert_eq!(scaled.dimensions(), (0, 10));
    }

    #[test]
    fn load_scaled_rejects_corrupt_bytes() {
        assert!(load_scaled(&[1u8, 2, 3, 4], 10, 10).is_err());
    }
}
