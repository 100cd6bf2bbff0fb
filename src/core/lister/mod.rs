//! # Lister Module
//!
//! Discovers image files directly inside one gallery directory.
//!
//! ## Contract
//! - Only direct children are listed; subdirectories are never entered.
//! - Extensions are matched case-insensitively against the allow-list
//!   (.jpg, .jpeg, .png).
//! - A missing or non-directory path is an error, not an empty result.
//! - Entries come back sorted by file name so every pass sees the same order.
//!
//! ## Example
//! ```rust,ignore
//! use gallery_analyzer::core::lister::{DirectoryLister, ImageLister};
//!
//! let lister = DirectoryLister::new();
//! let listing = lister.list(Path::new("/photos"))?;
//! ```

mod filter;

pub use filter::ExtensionFilter;

use crate::error::ScanError;
use crate::events::{Event, EventSender, ListEvent};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A discovered image file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageEntry {
    /// Path to the image file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
    /// Format implied by the extension
    pub format: ImageFormat,
}

/// Image formats on the allow-list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            _ => ImageFormat::Unknown,
        }
    }
}

/// Result of listing a gallery directory
#[derive(Debug)]
pub struct Listing {
    /// Successfully discovered images, sorted by file name
    pub entries: Vec<ImageEntry>,
    /// Per-file errors that did not stop the listing
    pub errors: Vec<ScanError>,
}

/// Trait for gallery listers
///
/// Implement this to provide a custom image source (e.g., for testing).
pub trait ImageLister: Send + Sync {
    /// List the images directly inside `dir`
    fn list(&self, dir: &Path) -> Result<Listing, ScanError>;

    /// List with progress reporting via events
    fn list_with_events(&self, dir: &Path, events: &EventSender) -> Result<Listing, ScanError>;
}

/// Lister over a real directory
pub struct DirectoryLister {
    filter: ExtensionFilter,
}

impl DirectoryLister {
    /// Create a lister with the default extension allow-list
    pub fn new() -> Self {
        Self {
            filter: ExtensionFilter::new(),
        }
    }

    /// Replace the extension filter
    pub fn with_filter(mut self, filter: ExtensionFilter) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLister for DirectoryLister {
    fn list(&self, dir: &Path) -> Result<Listing, ScanError> {
        self.list_with_events(dir, &crate::events::null_sender())
    }

    fn list_with_events(&self, dir: &Path, events: &EventSender) -> Result<Listing, ScanError> {
        if !dir.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        if !dir.is_dir() {
            return Err(ScanError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }

        events.send(Event::List(ListEvent::Started {
            path: dir.to_path_buf(),
        }));

        let mut entries = Vec::new();
        let mut errors = Vec::new();

        // max_depth(1) visits the root and its direct children, nothing below
        let walker = WalkDir::new(dir).max_depth(1).sort_by_file_name();

        for entry_result in walker {
            match entry_result {
                Ok(entry) => {
                    let path = entry.path();

                    if path.is_dir() {
                        continue;
                    }
                    if !self.filter.should_include(path) {
                        continue;
                    }

                    match fs::metadata(path) {
                        Ok(metadata) => {
                            let image = ImageEntry {
                                path: path.to_path_buf(),
                                size: metadata.len(),
                                format: self.filter.format_of(path),
                            };

                            events.send(Event::List(ListEvent::ImageFound {
                                path: image.path.clone(),
                            }));

                            entries.push(image);
                        }
                        Err(e) => {
                            errors.push(ScanError::ReadDirectory {
                                path: path.to_path_buf(),
                                source: e,
                            });
                        }
                    }
                }
                Err(e) => {
                    let path = e.path().map(|p| p.to_path_buf()).unwrap_or_default();

                    let error = if e.io_error().map(|e| e.kind())
                        == Some(std::io::ErrorKind::PermissionDenied)
                    {
                        ScanError::PermissionDenied { path }
                    } else {
                        ScanError::ReadDirectory {
                            path,
                            source: std::io::Error::other(e.to_string()),
                        }
                    };

                    errors.push(error);
                }
            }
        }

        events.send(Event::List(ListEvent::Completed {
            total_images: entries.len(),
        }));

        Ok(Listing { entries, errors })
    }
}
