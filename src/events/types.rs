//! Event type definitions for progress reporting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the gallery analyzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Directory listing events
    List(ListEvent),
    /// Detection pass events
    Pass(PassEvent),
    /// Analysis-level events
    Analysis(AnalysisEvent),
}

/// The four detection passes, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pass {
    Duplicates,
    Blur,
    Text,
    Faces,
}

impl std::fmt::Display for Pass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pass::Duplicates => write!(f, "Duplicates"),
            Pass::Blur => write!(f, "Blur"),
            Pass::Text => write!(f, "Text"),
            Pass::Faces => write!(f, "Faces"),
        }
    }
}

/// Events while listing the gallery directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ListEvent {
    /// Listing has started
    Started { path: PathBuf },
    /// An image file passed the extension filter
    ImageFound { path: PathBuf },
    /// Listing completed
    Completed { total_images: usize },
}

/// Events during a detection pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PassEvent {
    /// A pass has started over the full image list
    Started { pass: Pass, total_images: usize },
    /// Progress update during a pass
    Progress(PassProgress),
    /// An image was flagged by this pass
    Flagged { pass: Pass, path: PathBuf },
    /// An image failed and was skipped; the pass continues
    ImageSkipped {
        pass: Pass,
        path: PathBuf,
        message: String,
    },
    /// The pass finished the full list
    Completed { pass: Pass, findings: usize },
}

/// Progress information during a pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassProgress {
    /// Which pass is running
    pub pass: Pass,
    /// Number of images processed so far
    pub completed: usize,
    /// Total number of images in the list
    pub total: usize,
    /// Image currently being processed
    pub current_path: PathBuf,
}

/// Analysis-level events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AnalysisEvent {
    /// The analyzer has started
    Started,
    /// Moving to a new pass
    PassChanged { pass: Pass },
    /// All passes completed
    Completed { summary: AnalysisSummary },
    /// The analyzer hit a fatal error
    Error { message: String },
}

/// Summary of a completed analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    /// Total images listed
    pub total_images: usize,
    /// Number of duplicate pairs found
    pub duplicate_pairs: usize,
    /// Number of blurry images
    pub blurry_images: usize,
    /// Number of images with embedded text
    pub images_with_text: usize,
    /// Number of images with faces
    pub images_with_faces: usize,
    /// Number of per-image failures that were skipped
    pub skipped: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}
