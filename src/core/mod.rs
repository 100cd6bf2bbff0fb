//! # Core Analysis Engine
//!
//! The headless gallery analysis engine, independent of any UI.
//!
//! ## Modules
//! - `lister` - Discover images in the gallery directory
//! - `decode` - Shared image decoding (JPEG fast path)
//! - `hasher` - Perceptual hash computation
//! - `duplicates` - Exact-equality duplicate pairing
//! - `blur` - Laplacian-variance sharpness scoring
//! - `ocr` - Embedded-text extraction port and tesseract engine
//! - `faces` - Face detection port and SeetaFace engine
//! - `analyzer` - The four-pass driver producing a [`analyzer::GalleryReport`]
//! - `viewer` - Optional rendering of flagged images

pub mod analyzer;
pub mod blur;
pub mod decode;
pub mod duplicates;
pub mod faces;
pub mod hasher;
pub mod lister;
pub mod ocr;
pub mod viewer;
