//! # Blur Module
//!
//! Scores image sharpness via Laplacian variance and thresholds it.
//!
//! The Laplacian operator detects edges. Sharp images have more defined
//! edges, resulting in higher variance in the Laplacian output. The score
//! is computed on the full-resolution grayscale image so the default
//! threshold keeps its conventional meaning.
//!
//! A decode failure is an error, never a verdict: callers can always tell
//! "could not measure" apart from "not blurry".

use crate::core::decode::ImageDecoder;
use crate::error::ImageError;
use image::GrayImage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default variance threshold below which an image counts as blurry
pub const DEFAULT_BLUR_THRESHOLD: f64 = 100.0;

/// Outcome of measuring one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BlurVerdict {
    /// Variance at or above the threshold
    Sharp { score: f64 },
    /// Variance below the threshold
    Blurry { score: f64 },
}

impl BlurVerdict {
    /// The Laplacian variance behind this verdict
    pub fn score(&self) -> f64 {
        match self {
            BlurVerdict::Sharp { score } | BlurVerdict::Blurry { score } => *score,
        }
    }

    /// True if the image was classified as blurry
    pub fn is_blurry(&self) -> bool {
        matches!(self, BlurVerdict::Blurry { .. })
    }
}

/// Thresholding blur detector
#[derive(Debug, Clone, Copy)]
pub struct BlurDetector {
    /// Variance threshold; images scoring below it are blurry
    threshold: f64,
}

impl Default for BlurDetector {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_BLUR_THRESHOLD,
        }
    }
}

impl BlurDetector {
    /// Create a detector with a custom threshold
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// The configured threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Measure an image file
    pub fn analyze_file(&self, path: &Path) -> Result<BlurVerdict, ImageError> {
        let gray = ImageDecoder::decode_gray(path)?;
        Ok(self.analyze_image(&gray))
    }

    /// Measure an already-decoded grayscale image
    pub fn analyze_image(&self, gray: &GrayImage) -> BlurVerdict {
        let score = laplacian_variance(gray);
        if score < self.threshold {
            BlurVerdict::Blurry { score }
        } else {
            BlurVerdict::Sharp { score }
        }
    }
}

/// Compute Laplacian variance as a measure of sharpness.
///
/// Kernel: [0, 1, 0; 1, -4, 1; 0, 1, 0]. Border pixels are excluded.
pub fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();

    if width < 3 || height < 3 {
        return 0.0;
    }

    let mut laplacian_values: Vec<f64> = Vec::with_capacity((width * height) as usize);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = gray.get_pixel(x, y)[0] as f64;
            let top = gray.get_pixel(x, y - 1)[0] as f64;
            let bottom = gray.get_pixel(x, y + 1)[0] as f64;
            let left = gray.get_pixel(x - 1, y)[0] as f64;
            let right = gray.get_pixel(x + 1, y)[0] as f64;

            laplacian_values.push(top + bottom + left + right - 4.0 * center);
        }
    }

    if laplacian_values.is_empty() {
        return 0.0;
    }

    let n = laplacian_values.len() as f64;
    let mean = laplacian_values.iter().sum::<f64>() / n;
    laplacian_values
        .iter()
        .map(|&v| (v - mean).powi(2))
        .sum::<f64>()
        / n
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    fn create_uniform_image(value: u8, size: u32) -> GrayImage {
        ImageBuffer::from_fn(size, size, |_, _| Luma([value]))
    }

    fn create_checkerboard_image(size: u32) -> GrayImage {
        ImageBuffer::from_fn(
            size,
            size,
            |x, y| {
                if (x + y) % 2 == 0 {
                    Luma([0])
                } else {
                    Luma([255])
                }
            },
        )
    }

    #[test]
    fn uniform_image_is_blurry_under_default_threshold() {
        let detector = BlurDetector::default();
        let verdict = detector.analyze_image(&create_uniform_image(128, 64));

        assert!(verdict.is_blurry());
        assert!(
            verdict.score() < 1.0,
            "flat image should have near-zero variance, got {}",
            verdict.score()
        );
    }

    #[test]
    fn checkerboard_is_sharp_under_default_threshold() {
        let detector = BlurDetector::default();
        let verdict = detector.analyze_image(&create_checkerboard_image(64));

        assert!(!verdict.is_blurry());
        assert!(
            verdict.score() > 1000.0,
            "checkerboard should have high variance, got {}",
            verdict.score()
        );
    }

    #[test]
    fn threshold_splits_the_same_score() {
        let gray = create_checkerboard_image(64);
        let score = laplacian_variance(&gray);

        let lenient = BlurDetector::new(score / 2.0);
        let strict = BlurDetector::new(score * 2.0);

        assert!(!lenient.analyze_image(&gray).is_blurry());
        assert!(strict.analyze_image(&gray).is_blurry());
    }

    #[test]
    fn tiny_images_score_zero() {
        let gray = create_uniform_image(42, 2);
        assert_eq!(laplacian_variance(&gray), 0.0);
    }

    #[test]
    fn measurement_is_idempotent() {
        let detector = BlurDetector::default();
        let gray = create_checkerboard_image(32);

        let first = detector.analyze_image(&gray);
        let second = detector.analyze_image(&gray);

        assert_eq!(first, second);
    }

    #[test]
    fn decode_failure_is_an_error_not_a_verdict() {
        let detector = BlurDetector::default();
        let result = detector.analyze_file(Path::new("/nonexistent/image.png"));

        assert!(result.is_err());
    }
}
