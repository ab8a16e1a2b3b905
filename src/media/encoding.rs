// SPDX-License-Identifier: GPL-3.0-only

//! JPEG encoding for captured frames and picked images

use crate::backends::camera::CameraFrame;
use crate::constants::Quality;
use crate::storage;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Convert an RGBA frame to a tightly packed RGB image
///
/// Rows may carry padding; `stride` is the byte length of one source row.
pub fn rgba_to_rgb(frame: &CameraFrame) -> Result<RgbImage, String> {
    let width = frame.width as usize;
    let height = frame.height as usize;
    let stride = frame.stride as usize;

    if width == 0 || height == 0 {
        return Err("Frame has no pixels".to_string());
    }
    if stride < width * 4 || frame.data.len() < stride * (height - 1) + width * 4 {
        return Err(format!(
            "Frame buffer too small: {} bytes for {}x{} (stride {})",
            frame.data.len(),
            width,
            height,
            stride
        ));
    }

    let mut rgb = Vec::with_capacity(width * height * 3);
    for row in frame.data.chunks(stride).take(height) {
        for pixel in row[..width * 4].chunks_exact(4) {
            rgb.extend_from_slice(&pixel[..3]);
        }
    }

    RgbImage::from_raw(frame.width, frame.height, rgb)
        .ok_or_else(|| "Failed to build RGB image".to_string())
}

/// Encode image as JPEG
pub fn encode_jpeg(image: &RgbImage, quality: Quality) -> Result<Vec<u8>, String> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);

    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, quality.jpeg_quality());

    encoder
        .encode(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| format!("JPEG encoding failed: {}", e))?;

    debug!(
        size = buffer.len(),
        width = image.width(),
        height = image.height(),
        quality = quality.jpeg_quality(),
        "JPEG encoded"
    );
    Ok(buffer)
}

/// Write encoded JPEG bytes to a fresh file in `dir`
pub fn write_jpeg(data: &[u8], dir: &Path) -> std::io::Result<PathBuf> {
    storage::ensure_directory(dir)?;
    let path = storage::unique_file_path(dir, "jpg");
    std::fs::write(&path, data)?;
    info!(path = %path.display(), size = data.len(), "Image written");
    Ok(path)
}

/// Decode any supported image file and re-encode it as JPEG into `dir`
pub fn recompress_file(source: &Path, dir: &Path, quality: Quality) -> Result<PathBuf, String> {
    let decoded = image::open(source)
        .map_err(|e| format!("Failed to decode {}: {}", source.display(), e))?;
    let data = encode_jpeg(&decoded.to_rgb8(), quality)?;
    write_jpeg(&data, dir).map_err(|e| format!("Failed to write image: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn frame(width: u32, height: u32, stride: u32) -> CameraFrame {
        let mut data = vec![0u8; (stride * height) as usize];
        for y in 0..height as usize {
            for x in 0..width as usize {
                let i = y * stride as usize + x * 4;
                data[i..i + 4].copy_from_slice(&[10, 20, 30, 255]);
            }
        }
        CameraFrame {
            width,
            height,
            stride,
            data: Arc::from(data),
        }
    }

    #[test]
    fn test_rgba_to_rgb_drops_alpha_and_padding() {
        let rgb = rgba_to_rgb(&frame(3, 2, 16)).unwrap();
        assert_eq!(rgb.dimensions(), (3, 2));
        assert_eq!(rgb.as_raw().len(), 3 * 2 * 3);
        assert!(rgb.pixels().all(|p| p.0 == [10, 20, 30]));
    }

    #[test]
    fn test_rgba_to_rgb_rejects_short_buffer() {
        let mut short = frame(4, 4, 16);
        short.data = Arc::from(vec![0u8; 10]);
        assert!(rgba_to_rgb(&short).is_err());
    }

    #[test]
    fn test_encode_jpeg_produces_jpeg_magic() {
        let rgb = rgba_to_rgb(&frame(8, 8, 32)).unwrap();
        let data = encode_jpeg(&rgb, Quality::new(0.8)).unwrap();
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_recompress_file_writes_jpeg_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        RgbImage::from_pixel(4, 4, image::Rgb([200, 100, 50]))
            .save(&source)
            .unwrap();

        let out = recompress_file(&source, &dir.path().join("cache"), Quality::new(0.8)).unwrap();

        assert_eq!(out.extension().unwrap(), "jpg");
        let reopened = image::open(&out).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (4, 4));
    }
}
