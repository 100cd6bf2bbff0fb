//! # Viewer Module
//!
//! Renders findings by handing flagged images to the platform viewer.
//!
//! Rendering is fully decoupled from analysis: the analyzer produces a
//! headless report, and a viewer (if any) is applied to it afterwards.
//! The default is [`NullViewer`], so nothing opens unless asked for.

use std::path::Path;
use tracing::warn;

/// Something that can show a flagged image to the user
pub trait FindingViewer {
    /// Show one image, annotated with why it was flagged
    fn show(&self, path: &Path, reason: &str);
}

/// Opens flagged images with the system default image viewer
pub struct SystemViewer;

impl FindingViewer for SystemViewer {
    fn show(&self, path: &Path, reason: &str) {
        if let Err(e) = opener::open(path) {
            warn!(path = %path.display(), %reason, "could not open image viewer: {e}");
        }
    }
}

/// Viewer that shows nothing; the default
pub struct NullViewer;

impl FindingViewer for NullViewer {
    fn show(&self, _path: &Path, _reason: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_viewer_is_a_no_op() {
        let viewer = NullViewer;
        viewer.show(Path::new("/photos/a.jpg"), "blurry");
    }
}
