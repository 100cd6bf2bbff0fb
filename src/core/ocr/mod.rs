//! # OCR Module
//!
//! Extracts embedded text from images.
//!
//! ## Design
//! Recognition sits behind the [`TextRecognizer`] trait so the analyzer
//! never knows which engine is running - the shipped engine drives the
//! external `tesseract` binary, tests plug in a mock. Engines are probed
//! once at startup; a missing installation is fatal with a remediation
//! hint rather than a per-image surprise.
//!
//! Output is plain text trimmed of surrounding whitespace. Layout,
//! bounding boxes and confidence values are not retained.

mod tesseract;

pub use tesseract::TesseractCli;

use crate::error::OcrError;
use std::path::Path;

/// Pluggable OCR engine
pub trait TextRecognizer: Send + Sync {
    /// Verify once that the engine is usable; called before any pass runs
    fn probe(&self) -> Result<(), OcrError>;

    /// Recognize text in one image, trimmed; empty string means no text
    fn recognize(&self, path: &Path) -> Result<String, OcrError>;

    /// Engine name for log lines
    fn name(&self) -> &str;
}
