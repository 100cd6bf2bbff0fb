//! Extension filtering for the gallery lister.

use super::ImageFormat;
use std::path::Path;

/// Filters directory entries down to supported images
pub struct ExtensionFilter {
    /// File extensions to include, lowercase
    extensions: std::collections::HashSet<String>,
}

impl ExtensionFilter {
    /// Create a filter with the default allow-list: jpg, jpeg, png
    pub fn new() -> Self {
        Self {
            extensions: ["jpg", "jpeg", "png"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            self.extensions.contains(&ext.to_lowercase())
        } else {
            false
        }
    }

    /// Get the image format for a path
    pub fn format_of(&self, path: &Path) -> ImageFormat {
        path.extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown)
    }
}

impl Default for ExtensionFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_jpeg_and_png() {
        let filter = ExtensionFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.jpeg")));
        assert!(filter.should_include(Path::new("/photos/image.png")));
    }

    #[test]
    fn filter_is_case_insensitive() {
        let filter = ExtensionFilter::new();
        assert!(filter.should_include(Path::new("/photos/IMG_1234.JPG")));
        assert!(filter.should_include(Path::new("/photos/scan.PNG")));
        assert!(filter.should_include(Path::new("/photos/pic.JpEg")));
    }

    #[test]
    fn filter_excludes_non_images() {
        let filter = ExtensionFilter::new();
        assert!(!filter.should_include(Path::new("/photos/document.txt")));
        assert!(!filter.should_include(Path::new("/photos/video.mp4")));
        assert!(!filter.should_include(Path::new("/photos/raw.webp")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ExtensionFilter::new();
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
    }

    #[test]
    fn filter_accepts_custom_extensions() {
        let filter = ExtensionFilter::new().with_extensions(vec!["BMP".to_string()]);
        assert!(filter.should_include(Path::new("/photos/old.bmp")));
        assert!(!filter.should_include(Path::new("/photos/image.jpg")));
    }
}
