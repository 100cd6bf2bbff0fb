//! SeetaFace-backed face detection engine.
//!
//! Wraps the rustface frontal-face detector. The Haar-cascade parameters
//! of classic OpenCV pipelines (scale factor, min neighbors) have no
//! analog here; the detector is pinned to fixed pyramid/window settings
//! instead so results stay deterministic run to run.

use super::{FaceBounds, FaceDetector};
use crate::error::FaceError;
use image::GrayImage;
use rustface::{create_detector_with_model, read_model, Detector, ImageData};
use std::fs;
use std::io::Cursor;
use std::path::Path;

/// Frontal-face detector built on rustface (SeetaFace)
pub struct SeetaDetector {
    detector: Box<dyn Detector>,
}

impl SeetaDetector {
    /// Load the SeetaFace model from `path` and build a tuned detector.
    ///
    /// Fails fast with a remediation hint when the model file is missing
    /// or unreadable; callers run this once at startup.
    pub fn from_model_file(path: &Path) -> Result<Self, FaceError> {
        if !path.exists() {
            return Err(FaceError::ModelNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = fs::read(path).map_err(|e| FaceError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let model = read_model(Cursor::new(bytes)).map_err(|e| FaceError::ModelLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut detector = create_detector_with_model(model);
        detector.set_min_face_size(20);
        detector.set_score_thresh(2.0);
        detector.set_pyramid_scale_factor(0.8);
        detector.set_slide_window_step(4, 4);

        Ok(Self { detector })
    }
}

impl FaceDetector for SeetaDetector {
    fn detect(&mut self, gray: &GrayImage) -> Vec<FaceBounds> {
        let (width, height) = gray.dimensions();
        let mut image = ImageData::new(gray, width, height);

        self.detector
            .detect(&mut image)
            .into_iter()
            .map(|face| {
                let bbox = face.bbox();
                FaceBounds {
                    x: bbox.x(),
                    y: bbox.y(),
                    width: bbox.width(),
                    height: bbox.height(),
                    score: face.score(),
                }
            })
            .collect()
    }

    fn name(&self) -> &str {
        "seetaface"
    }
}
