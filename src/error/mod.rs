//! # Error Module
//!
//! User-friendly error types for the gallery analyzer.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Recovery hints** - fatal startup errors tell the user how to fix them
//! - **Image-level failures are not fatal** - a pass logs and skips them

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("Listing error: {0}")]
    Scan(#[from] ScanError),

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Face detection error: {0}")]
    Face(#[from] FaceError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Errors that occur while listing the gallery directory
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Permission denied accessing: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while decoding or measuring a single image
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("Image is empty or corrupted: {path}")]
    Empty { path: PathBuf },

    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the OCR engine
#[derive(Error, Debug)]
pub enum OcrError {
    #[error(
        "OCR binary `{command}` was not found. Install tesseract \
         (e.g. `apt install tesseract-ocr` or `brew install tesseract`) \
         or point --tesseract-cmd at the executable."
    )]
    BinaryNotFound { command: String },

    #[error("OCR binary `{command}` is present but not usable: {reason}")]
    EngineUnavailable { command: String, reason: String },

    #[error("OCR failed for {path}: {reason}")]
    RecognitionFailed { path: PathBuf, reason: String },

    #[error("OCR produced non-UTF-8 output for {path}")]
    InvalidOutput { path: PathBuf },
}

/// Errors from the face detection engine
#[derive(Error, Debug)]
pub enum FaceError {
    #[error(
        "Face model not found: {path}. Download the SeetaFace frontal-face \
         model (seeta_fd_frontal_v1.0.bin) and pass it via --face-model."
    )]
    ModelNotFound { path: PathBuf },

    #[error("Failed to load face model {path}: {reason}")]
    ModelLoad { path: PathBuf, reason: String },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, GalleryError>;
