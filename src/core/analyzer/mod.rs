//! # Analyzer Module
//!
//! The driver: lists the gallery once, then runs four independent
//! detection passes over the same immutable image list.
//!
//! ## Passes
//! 1. **Duplicates** - perceptual hash, exact-equality pairing
//! 2. **Blur** - Laplacian variance vs threshold
//! 3. **Text** - OCR through the configured engine
//! 4. **Faces** - frontal-face detection through the configured engine
//!
//! ## Error policy
//! - Startup problems (missing directory, unusable OCR engine) are fatal
//!   and reported before any pass begins.
//! - A failure on one image is logged, recorded in the report's skip
//!   list, and never aborts the pass.
//!
//! The result is a headless [`GalleryReport`]; rendering (printing,
//! opening viewers) is entirely the caller's business.

use crate::core::blur::BlurDetector;
use crate::core::decode::ImageDecoder;
use crate::core::duplicates::{find_duplicate_pairs, DuplicatePair};
use crate::core::faces::{FaceBounds, FaceDetector};
use crate::core::hasher::{HashAlgorithmKind, HasherConfig, ImageHashValue};
use crate::core::lister::{DirectoryLister, ImageEntry, ImageLister};
use crate::core::ocr::TextRecognizer;
use crate::error::{GalleryError, ImageError, Result};
use crate::events::{
    null_sender, AnalysisEvent, AnalysisSummary, Event, EventSender, Pass, PassEvent, PassProgress,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

/// A blurry image and its sharpness score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlurFinding {
    pub path: PathBuf,
    pub score: f64,
}

/// An image with embedded text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextFinding {
    pub path: PathBuf,
    pub text: String,
}

/// An image with one or more faces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaceFinding {
    pub path: PathBuf,
    pub faces: Vec<FaceBounds>,
}

impl FaceFinding {
    /// Number of faces found
    pub fn count(&self) -> usize {
        self.faces.len()
    }
}

/// An image a pass could not process; the pass carried on without it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub pass: Pass,
    pub reason: String,
}

/// Headless result of a full gallery analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryReport {
    /// Total images listed
    pub total_images: usize,
    /// Duplicate pairs, in list order
    pub duplicates: Vec<DuplicatePair>,
    /// Blurry images, in list order
    pub blurry: Vec<BlurFinding>,
    /// Images with non-empty OCR text, in list order
    pub texts: Vec<TextFinding>,
    /// Images with faces, in list order
    pub faces: Vec<FaceFinding>,
    /// Per-image failures across all passes
    pub skipped: Vec<SkippedImage>,
    /// Wall-clock duration in milliseconds
    pub duration_ms: u64,
}

impl GalleryReport {
    /// Condense the report into the event summary shape
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            total_images: self.total_images,
            duplicate_pairs: self.duplicates.len(),
            blurry_images: self.blurry.len(),
            images_with_text: self.texts.len(),
            images_with_faces: self.faces.len(),
            skipped: self.skipped.len(),
            duration_ms: self.duration_ms,
        }
    }
}

/// Configuration for the analyzer
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// The gallery directory
    pub folder: PathBuf,
    /// Hash algorithm for the duplicate pass
    pub algorithm: HashAlgorithmKind,
    /// Variance threshold for the blur pass
    pub blur_threshold: f64,
}

/// Builder for [`GalleryAnalyzer`]
pub struct GalleryAnalyzerBuilder {
    folder: PathBuf,
    algorithm: HashAlgorithmKind,
    blur_threshold: f64,
    lister: Box<dyn ImageLister>,
    ocr: Option<Box<dyn TextRecognizer>>,
    faces: Option<Box<dyn FaceDetector>>,
}

impl GalleryAnalyzerBuilder {
    fn new(folder: PathBuf) -> Self {
        Self {
            folder,
            algorithm: HashAlgorithmKind::Average,
            blur_threshold: crate::core::blur::DEFAULT_BLUR_THRESHOLD,
            lister: Box::new(DirectoryLister::new()),
            ocr: None,
            faces: None,
        }
    }

    /// Set the hash algorithm for the duplicate pass
    pub fn algorithm(mut self, algorithm: HashAlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Set the blur variance threshold
    pub fn blur_threshold(mut self, threshold: f64) -> Self {
        self.blur_threshold = threshold;
        self
    }

    /// Replace the directory lister (e.g. for testing)
    pub fn lister(mut self, lister: Box<dyn ImageLister>) -> Self {
        self.lister = lister;
        self
    }

    /// Set the OCR engine (required)
    pub fn ocr(mut self, ocr: Box<dyn TextRecognizer>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    /// Set the face detection engine (required)
    pub fn faces(mut self, faces: Box<dyn FaceDetector>) -> Self {
        self.faces = Some(faces);
        self
    }

    /// Build the analyzer
    pub fn build(self) -> Result<GalleryAnalyzer> {
        let ocr = self
            .ocr
            .ok_or_else(|| GalleryError::Config("no OCR engine configured".to_string()))?;
        let faces = self
            .faces
            .ok_or_else(|| GalleryError::Config("no face detector configured".to_string()))?;

        Ok(GalleryAnalyzer {
            config: AnalyzerConfig {
                folder: self.folder,
                algorithm: self.algorithm,
                blur_threshold: self.blur_threshold,
            },
            lister: self.lister,
            ocr,
            faces,
        })
    }
}

/// The gallery analysis driver
pub struct GalleryAnalyzer {
    config: AnalyzerConfig,
    lister: Box<dyn ImageLister>,
    ocr: Box<dyn TextRecognizer>,
    faces: Box<dyn FaceDetector>,
}

impl GalleryAnalyzer {
    /// Start building an analyzer over `folder`
    pub fn builder(folder: impl Into<PathBuf>) -> GalleryAnalyzerBuilder {
        GalleryAnalyzerBuilder::new(folder.into())
    }

    /// The active configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Run all passes without progress reporting
    pub fn run(&mut self) -> Result<GalleryReport> {
        self.run_with_events(&null_sender())
    }

    /// Run all passes with progress events
    pub fn run_with_events(&mut self, events: &EventSender) -> Result<GalleryReport> {
        let start_time = Instant::now();

        events.send(Event::Analysis(AnalysisEvent::Started));

        // Startup validation: an unusable OCR engine halts the run before
        // any pass begins, with a remediation hint in the error.
        self.ocr.probe().map_err(|e| {
            events.send(Event::Analysis(AnalysisEvent::Error {
                message: e.to_string(),
            }));
            GalleryError::from(e)
        })?;

        // One listing; every pass iterates this same immutable list
        let listing = self
            .lister
            .list_with_events(&self.config.folder, events)
            .map_err(|e| {
                events.send(Event::Analysis(AnalysisEvent::Error {
                    message: e.to_string(),
                }));
                GalleryError::from(e)
            })?;

        for error in &listing.errors {
            warn!("listing: {error}");
        }

        let entries = listing.entries;
        let total_images = entries.len();
        let mut skipped = Vec::new();

        info!(
            folder = %self.config.folder.display(),
            total_images, "gallery listed"
        );

        let duplicates = self.duplicate_pass(&entries, events, &mut skipped);
        let blurry = self.blur_pass(&entries, events, &mut skipped);
        let texts = self.text_pass(&entries, events, &mut skipped);
        let faces = self.face_pass(&entries, events, &mut skipped);

        let report = GalleryReport {
            total_images,
            duplicates,
            blurry,
            texts,
            faces,
            skipped,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.send(Event::Analysis(AnalysisEvent::Completed {
            summary: report.summary(),
        }));

        Ok(report)
    }

    /// Pass 1: hash every image, pair exact-equal hashes in list order
    fn duplicate_pass(
        &self,
        entries: &[ImageEntry],
        events: &EventSender,
        skipped: &mut Vec<SkippedImage>,
    ) -> Vec<DuplicatePair> {
        let pass = Pass::Duplicates;
        start_pass(pass, entries.len(), events);

        let hasher = HasherConfig::new().algorithm(self.config.algorithm).build();
        let completed = AtomicUsize::new(0);

        // Hash in parallel; the indexed collect keeps list order intact
        let hash_results: Vec<(PathBuf, std::result::Result<ImageHashValue, ImageError>)> = entries
            .par_iter()
            .map(|entry| {
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Pass(PassEvent::Progress(PassProgress {
                    pass,
                    completed: done,
                    total: entries.len(),
                    current_path: entry.path.clone(),
                })));

                (entry.path.clone(), hasher.hash_file(&entry.path))
            })
            .collect();

        let mut hashes = Vec::with_capacity(hash_results.len());
        for (path, result) in hash_results {
            match result {
                Ok(hash) => hashes.push((path, hash)),
                Err(e) => skip(pass, path, &e.to_string(), events, skipped),
            }
        }

        let pairs = find_duplicate_pairs(&hashes);
        for pair in &pairs {
            debug!(
                duplicate = %pair.duplicate.display(),
                original = %pair.original.display(),
                "duplicate found"
            );
            events.send(Event::Pass(PassEvent::Flagged {
                pass,
                path: pair.duplicate.clone(),
            }));
        }

        finish_pass(pass, pairs.len(), events);
        pairs
    }

    /// Pass 2: score sharpness, flag images under the threshold
    fn blur_pass(
        &self,
        entries: &[ImageEntry],
        events: &EventSender,
        skipped: &mut Vec<SkippedImage>,
    ) -> Vec<BlurFinding> {
        let pass = Pass::Blur;
        start_pass(pass, entries.len(), events);

        let detector = BlurDetector::new(self.config.blur_threshold);
        let completed = AtomicUsize::new(0);

        let verdicts: Vec<_> = entries
            .par_iter()
            .map(|entry| {
                let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                events.send(Event::Pass(PassEvent::Progress(PassProgress {
                    pass,
                    completed: done,
                    total: entries.len(),
                    current_path: entry.path.clone(),
                })));

                (entry.path.clone(), detector.analyze_file(&entry.path))
            })
            .collect();

        let mut findings = Vec::new();
        for (path, result) in verdicts {
            match result {
                Ok(verdict) if verdict.is_blurry() => {
                    debug!(path = %path.display(), score = verdict.score(), "blurry image");
                    events.send(Event::Pass(PassEvent::Flagged {
                        pass,
                        path: path.clone(),
                    }));
                    findings.push(BlurFinding {
                        path,
                        score: verdict.score(),
                    });
                }
                Ok(_) => {}
                Err(e) => skip(pass, path, &e.to_string(), events, skipped),
            }
        }

        finish_pass(pass, findings.len(), events);
        findings
    }

    /// Pass 3: OCR every image, keep non-empty text
    fn text_pass(
        &self,
        entries: &[ImageEntry],
        events: &EventSender,
        skipped: &mut Vec<SkippedImage>,
    ) -> Vec<TextFinding> {
        let pass = Pass::Text;
        start_pass(pass, entries.len(), events);

        let mut findings = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            events.send(Event::Pass(PassEvent::Progress(PassProgress {
                pass,
                completed: index + 1,
                total: entries.len(),
                current_path: entry.path.clone(),
            })));

            match self.ocr.recognize(&entry.path) {
                Ok(text) if !text.is_empty() => {
                    debug!(path = %entry.path.display(), engine = self.ocr.name(), "text found");
                    events.send(Event::Pass(PassEvent::Flagged {
                        pass,
                        path: entry.path.clone(),
                    }));
                    findings.push(TextFinding {
                        path: entry.path.clone(),
                        text,
                    });
                }
                Ok(_) => {}
                Err(e) => skip(pass, entry.path.clone(), &e.to_string(), events, skipped),
            }
        }

        finish_pass(pass, findings.len(), events);
        findings
    }

    /// Pass 4: detect frontal faces
    fn face_pass(
        &mut self,
        entries: &[ImageEntry],
        events: &EventSender,
        skipped: &mut Vec<SkippedImage>,
    ) -> Vec<FaceFinding> {
        let pass = Pass::Faces;
        start_pass(pass, entries.len(), events);

        let mut findings = Vec::new();
        for (index, entry) in entries.iter().enumerate() {
            events.send(Event::Pass(PassEvent::Progress(PassProgress {
                pass,
                completed: index + 1,
                total: entries.len(),
                current_path: entry.path.clone(),
            })));

            let gray = match ImageDecoder::decode_gray(&entry.path) {
                Ok(gray) => gray,
                Err(e) => {
                    skip(pass, entry.path.clone(), &e.to_string(), events, skipped);
                    continue;
                }
            };

            let faces = self.faces.detect(&gray);
            if !faces.is_empty() {
                info!("Faces detected in {}", entry.path.display());
                events.send(Event::Pass(PassEvent::Flagged {
                    pass,
                    path: entry.path.clone(),
                }));
                findings.push(FaceFinding {
                    path: entry.path.clone(),
                    faces,
                });
            }
        }

        finish_pass(pass, findings.len(), events);
        findings
    }
}

fn start_pass(pass: Pass, total_images: usize, events: &EventSender) {
    events.send(Event::Analysis(AnalysisEvent::PassChanged { pass }));
    events.send(Event::Pass(PassEvent::Started { pass, total_images }));
}

fn finish_pass(pass: Pass, findings: usize, events: &EventSender) {
    events.send(Event::Pass(PassEvent::Completed { pass, findings }));
}

fn skip(
    pass: Pass,
    path: PathBuf,
    reason: &str,
    events: &EventSender,
    skipped: &mut Vec<SkippedImage>,
) {
    warn!(path = %path.display(), %pass, "skipping image: {reason}");
    events.send(Event::Pass(PassEvent::ImageSkipped {
        pass,
        path: path.clone(),
        message: reason.to_string(),
    }));
    skipped.push(SkippedImage {
        path,
        pass,
        reason: reason.to_string(),
    });
}
