//! Integration tests for the full analysis pipeline.
//!
//! These exercise the analyzer end-to-end over real image files, with
//! mock OCR/face engines so no external tools are needed:
//! - mixed galleries with every finding class at once
//! - non-recursive listing and extension filtering
//! - per-image failures that must not abort a pass

use gallery_analyzer::core::analyzer::GalleryAnalyzer;
use gallery_analyzer::core::faces::{FaceBounds, FaceDetector};
use gallery_analyzer::core::hasher::HashAlgorithmKind;
use gallery_analyzer::core::ocr::TextRecognizer;
use gallery_analyzer::error::{GalleryError, OcrError};
use image::{GrayImage, Rgb, RgbImage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// OCR engine returning canned text per file name; everything else is empty
struct CannedOcr {
    by_name: HashMap<String, String>,
}

impl CannedOcr {
    fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    fn with(mut self, name: &str, text: &str) -> Self {
        self.by_name.insert(name.to_string(), text.to_string());
        self
    }
}

impl TextRecognizer for CannedOcr {
    fn probe(&self) -> Result<(), OcrError> {
        Ok(())
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        Ok(self.by_name.get(&name).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "canned"
    }
}

/// Face detector that flags images whose top-left pixel is pure white
struct BrightCornerFaces;

impl FaceDetector for BrightCornerFaces {
    fn detect(&mut self, gray: &GrayImage) -> Vec<FaceBounds> {
        if gray.get_pixel(0, 0)[0] == 255 {
            vec![FaceBounds {
                x: 0,
                y: 0,
                width: 20,
                height: 20,
                score: 3.5,
            }]
        } else {
            Vec::new()
        }
    }

    fn name(&self) -> &str {
        "bright-corner"
    }
}

fn write_solid(dir: &Path, name: &str, value: u8) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(32, 32, Rgb([value, value, value]))
        .save(&path)
        .unwrap();
    path
}

/// Left half black, right half white; distinct hash from any solid image
fn write_vertical_split(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(32, 32, |x, _| {
        if x < 16 {
            Rgb([0, 0, 0])
        } else {
            Rgb([255, 255, 255])
        }
    })
    .save(&path)
    .unwrap();
    path
}

/// Top half white, bottom half black; white corner marks it as a "face"
fn write_horizontal_split(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_fn(32, 32, |_, y| {
        if y < 16 {
            Rgb([255, 255, 255])
        } else {
            Rgb([0, 0, 0])
        }
    })
    .save(&path)
    .unwrap();
    path
}

fn build_analyzer(dir: &Path, ocr: CannedOcr) -> GalleryAnalyzer {
    GalleryAnalyzer::builder(dir)
        .algorithm(HashAlgorithmKind::Average)
        .ocr(Box::new(ocr))
        .faces(Box::new(BrightCornerFaces))
        .build()
        .unwrap()
}

#[test]
fn mixed_gallery_produces_all_finding_classes() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    write_vertical_split(dir, "dup_a.png");
    write_vertical_split(dir, "dup_b.png");
    write_solid(dir, "flat.png", 128);
    write_horizontal_split(dir, "portrait.png");

    let ocr = CannedOcr::empty().with("flat.png", "HELLO WORLD");
    let mut analyzer = build_analyzer(dir, ocr);

    let report = analyzer.run().unwrap();

    assert_eq!(report.total_images, 4);

    // Duplicates: dup_b repeats dup_a, nothing else shares a hash
    assert_eq!(report.duplicates.len(), 1);
    assert!(report.duplicates[0].duplicate.ends_with("dup_b.png"));
    assert!(report.duplicates[0].original.ends_with("dup_a.png"));

    // Blur: only the flat image has near-zero variance
    assert_eq!(report.blurry.len(), 1);
    assert!(report.blurry[0].path.ends_with("flat.png"));

    // Text: only the canned finding, trimmed text intact
    assert_eq!(report.texts.len(), 1);
    assert_eq!(report.texts[0].text, "HELLO WORLD");

    // Faces: only the white-cornered portrait
    assert_eq!(report.faces.len(), 1);
    assert!(report.faces[0].path.ends_with("portrait.png"));
    assert_eq!(report.faces[0].faces.len(), 1);

    assert!(report.skipped.is_empty());
}

#[test]
fn listing_is_non_recursive_and_filters_extensions() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    write_solid(dir, "keep.JPG", 10);
    write_solid(dir, "keep.png", 20);
    std::fs::write(dir.join("skip.txt"), b"plain text").unwrap();
    std::fs::write(dir.join("skip.webp"), b"off the allow-list").unwrap();

    let nested = dir.join("nested");
    std::fs::create_dir(&nested).unwrap();
    write_solid(&nested, "below.png", 30);

    let mut analyzer = build_analyzer(dir, CannedOcr::empty());
    let report = analyzer.run().unwrap();

    assert_eq!(report.total_images, 2);
}

#[test]
fn corrupt_image_is_skipped_and_the_rest_complete() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    write_vertical_split(dir, "a.png");
    write_vertical_split(dir, "b.png");
    std::fs::write(dir.join("corrupt.jpg"), b"this is not a valid image").unwrap();

    let mut analyzer = build_analyzer(dir, CannedOcr::empty());
    let report = analyzer.run().unwrap();

    assert_eq!(report.total_images, 3);
    // The good pair is still found
    assert_eq!(report.duplicates.len(), 1);
    // The corrupt file is recorded per failing pass, never fatal
    assert!(report.skipped.iter().any(|s| s.path.ends_with("corrupt.jpg")));
    assert!(report
        .skipped
        .iter()
        .all(|s| s.path.ends_with("corrupt.jpg")));
}

#[test]
fn missing_gallery_directory_is_fatal() {
    let mut analyzer = build_analyzer(
        Path::new("/definitely/not/a/gallery"),
        CannedOcr::empty(),
    );

    let result = analyzer.run();
    assert!(matches!(result, Err(GalleryError::Scan(_))));
}

#[test]
fn three_way_duplicates_all_reference_the_first_image() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    write_vertical_split(dir, "one.png");
    write_vertical_split(dir, "two.png");
    write_vertical_split(dir, "three.png");

    let mut analyzer = build_analyzer(dir, CannedOcr::empty());
    let report = analyzer.run().unwrap();

    // Sorted listing: one.png, three.png, two.png
    assert_eq!(report.duplicates.len(), 2);
    assert!(report.duplicates[0].original.ends_with("one.png"));
    assert!(report.duplicates[1].original.ends_with("one.png"));
    assert!(report.duplicates[0].duplicate.ends_with("three.png"));
    assert!(report.duplicates[1].duplicate.ends_with("two.png"));
}

#[test]
fn reports_serialize_to_json() {
    let temp_dir = TempDir::new().unwrap();
    write_solid(temp_dir.path(), "flat.png", 60);

    let mut analyzer = build_analyzer(temp_dir.path(), CannedOcr::empty());
    let report = analyzer.run().unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("total_images"));
    assert!(json.contains("flat.png"));
}

#[test]
fn repeated_runs_agree() {
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path();

    write_vertical_split(dir, "a.png");
    write_vertical_split(dir, "b.png");
    write_solid(dir, "flat.png", 128);

    let mut analyzer = build_analyzer(dir, CannedOcr::empty());
    let first = analyzer.run().unwrap();
    let second = analyzer.run().unwrap();

    assert_eq!(first.duplicates.len(), second.duplicates.len());
    assert_eq!(first.blurry.len(), second.blurry.len());
    assert_eq!(
        serde_json::to_value(&first.duplicates).unwrap(),
        serde_json::to_value(&second.duplicates).unwrap()
    );
}
