//! # Decode Module
//!
//! Shared image decoding for every detection pass.
//!
//! Uses zune-jpeg for JPEG files (1.5-2x faster than image crate),
//! falls back to the image crate for everything else on the allow-list.

use crate::error::ImageError;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, Rgba};
use std::fs;
use std::path::Path;
use zune_core::colorspace::ColorSpace;
use zune_core::options::DecoderOptions;
use zune_jpeg::JpegDecoder;

/// Decodes gallery images with a format-specific fast path
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode an image from a file path using the fastest available decoder.
    pub fn decode(path: &Path) -> Result<DynamicImage, ImageError> {
        let is_jpeg = matches!(
            path.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase())
                .as_deref(),
            Some("jpg" | "jpeg")
        );

        if is_jpeg {
            Self::decode_jpeg(path).or_else(|_| Self::decode_fallback(path))
        } else {
            Self::decode_fallback(path)
        }
    }

    /// Decode straight to grayscale, as the blur and face passes consume it.
    pub fn decode_gray(path: &Path) -> Result<GrayImage, ImageError> {
        Ok(Self::decode(path)?.to_luma8())
    }

    /// Fast JPEG decoding using zune-jpeg
    fn decode_jpeg(path: &Path) -> Result<DynamicImage, ImageError> {
        let file_bytes = fs::read(path).map_err(|e| ImageError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let options = DecoderOptions::new_fast().jpeg_set_out_colorspace(ColorSpace::RGB);
        let mut decoder = JpegDecoder::new_with_options(&file_bytes, options);

        let pixels = decoder.decode().map_err(|e| ImageError::Decode {
            path: path.to_path_buf(),
            reason: format!("zune-jpeg decode failed: {:?}", e),
        })?;

        let info = decoder.info().ok_or_else(|| ImageError::Decode {
            path: path.to_path_buf(),
            reason: "missing image info after decode".to_string(),
        })?;

        let width = info.width as u32;
        let height = info.height as u32;
        let out_colorspace = decoder.get_output_colorspace().unwrap_or(ColorSpace::RGB);

        let truncated = || ImageError::Empty {
            path: path.to_path_buf(),
        };

        let image = match out_colorspace {
            ColorSpace::RGB => {
                let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageRgb8(buffer)
            }
            ColorSpace::RGBA => {
                let buffer: ImageBuffer<Rgba<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageRgba8(buffer)
            }
            ColorSpace::Luma => {
                let buffer: ImageBuffer<Luma<u8>, Vec<u8>> =
                    ImageBuffer::from_raw(width, height, pixels).ok_or_else(truncated)?;
                DynamicImage::ImageLuma8(buffer)
            }
            _ => return Self::decode_fallback(path),
        };

        Ok(image)
    }

    /// Fallback to image crate for non-JPEG formats
    fn decode_fallback(path: &Path) -> Result<DynamicImage, ImageError> {
        image::open(path).map_err(|e| ImageError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &TempDir, name: &str, value: u8) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let img = image::RgbImage::from_pixel(16, 16, Rgb([value, value, value]));
        img.save(&path).unwrap();
        path
    }

    #[test]
    fn decodes_png_via_fallback() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_png(&temp_dir, "plain.png", 100);

        let image = ImageDecoder::decode(&path).unwrap();
        assert_eq!(image.width(), 16);
        assert_eq!(image.height(), 16);
    }

    #[test]
    fn decode_gray_matches_dimensions() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_png(&temp_dir, "gray.png", 200);

        let gray = ImageDecoder::decode_gray(&path).unwrap();
        assert_eq!(gray.dimensions(), (16, 16));
        assert_eq!(gray.get_pixel(0, 0)[0], 200);
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.png");
        fs::write(&path, b"not an image at all").unwrap();

        let result = ImageDecoder::decode(&path);
        assert!(matches!(result, Err(ImageError::Decode { .. })));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = ImageDecoder::decode(Path::new("/nowhere/missing.jpg"));
        assert!(result.is_err());
    }
}
