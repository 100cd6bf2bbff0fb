//! # Faces Module
//!
//! Detects frontal faces in images.
//!
//! ## Design
//! Detection sits behind the [`FaceDetector`] trait; the shipped engine
//! wraps the rustface (SeetaFace) detector with a model file loaded and
//! validated once at startup. An image "has faces" iff the detector
//! returns one or more bounding boxes.
//!
//! Implementations take `&mut self` - detectors may keep internal
//! buffers between frames.

mod seeta;

pub use seeta::SeetaDetector;

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Bounding box of a detected face within an image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceBounds {
    /// X coordinate of the top-left corner (pixels)
    pub x: i32,
    /// Y coordinate of the top-left corner (pixels)
    pub y: i32,
    /// Width of the bounding box (pixels)
    pub width: u32,
    /// Height of the bounding box (pixels)
    pub height: u32,
    /// Detection confidence score
    pub score: f64,
}

/// Pluggable face detection backend
pub trait FaceDetector {
    /// Detect faces in a grayscale image
    fn detect(&mut self, gray: &GrayImage) -> Vec<FaceBounds>;

    /// Engine name for log lines
    fn name(&self) -> &str;
}
