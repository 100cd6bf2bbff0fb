//! # Gallery Analyzer
//!
//! Triage a photo gallery: find duplicate shots, blurry shots, images with
//! embedded text, and images with faces.
//!
//! ## Architecture
//! The library is split into a core engine (UI-agnostic) and presentation
//! layers:
//! - `core` - listing, hashing, blur scoring, OCR and face detection,
//!   orchestrated by the four-pass analyzer
//! - `events` - event-driven progress reporting (GUI-ready)
//! - `error` - user-friendly error types with remediation hints
//! - `cli` - command-line interface
//!
//! External engines (the tesseract binary, the SeetaFace model) are
//! validated once at startup; analysis itself is headless and pure.

pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use crate::core::analyzer::{GalleryAnalyzer, GalleryReport};
pub use error::{GalleryError, Result};

/// Initialize tracing for the library
///
/// This should be called by the application entry point (CLI or GUI).
pub fn init_tracing() {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set global default tracing subscriber");
}
