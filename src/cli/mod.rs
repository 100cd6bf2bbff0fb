//! # CLI Module
//!
//! Command-line interface for the gallery analyzer.
//!
//! ## Usage
//! ```bash
//! # Analyze a gallery folder
//! gallery-scan analyze ~/Pictures --face-model models/seeta_fd_frontal_v1.0.bin
//!
//! # Custom blur threshold, JSON output
//! gallery-scan analyze ~/Pictures --blur-threshold 80 --output json
//!
//! # Open every flagged image in the system viewer
//! gallery-scan analyze ~/Pictures --show
//! ```
//!
//! Startup validation happens in order - face model, OCR binary, gallery
//! directory - and each failure is fatal with a remediation hint before
//! any pass begins.

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use gallery_analyzer::core::analyzer::GalleryReport;
use gallery_analyzer::core::faces::SeetaDetector;
use gallery_analyzer::core::hasher::HashAlgorithmKind;
use gallery_analyzer::core::ocr::TesseractCli;
use gallery_analyzer::core::viewer::{FindingViewer, NullViewer, SystemViewer};
use gallery_analyzer::error::Result;
use gallery_analyzer::events::{AnalysisEvent, Event, EventChannel, ListEvent, PassEvent};
use gallery_analyzer::GalleryAnalyzer;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::path::PathBuf;
use std::thread;

/// Gallery Analyzer - duplicates, blur, text and faces in one scan
#[derive(Parser, Debug)]
#[command(name = "gallery-scan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a gallery directory
    Analyze {
        /// Directory containing the images (not searched recursively)
        path: PathBuf,

        /// Laplacian-variance threshold below which an image is blurry
        #[arg(long, default_value = "100.0")]
        blur_threshold: f64,

        /// Hash algorithm for duplicate detection
        #[arg(short, long, default_value = "average")]
        algorithm: Algorithm,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Open each flagged image in the system image viewer
        #[arg(long)]
        show: bool,

        /// Tesseract executable name or path
        #[arg(long, default_value = "tesseract")]
        tesseract_cmd: String,

        /// OCR language(s), e.g. "eng" or "nld+eng" (tesseract default if unset)
        #[arg(long)]
        lang: Option<String>,

        /// Path to the SeetaFace frontal-face model
        #[arg(long, default_value = "seeta_fd_frontal_v1.0.bin")]
        face_model: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Algorithm {
    /// Average Hash - fastest, matches exact-equality grouping (default)
    Average,
    /// Difference Hash - gradient-based
    Difference,
    /// Perceptual Hash - most robust to edits
    Perceptual,
}

impl From<Algorithm> for HashAlgorithmKind {
    fn from(algo: Algorithm) -> Self {
        match algo {
            Algorithm::Average => HashAlgorithmKind::Average,
            Algorithm::Difference => HashAlgorithmKind::Difference,
            Algorithm::Perceptual => HashAlgorithmKind::Perceptual,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Minimal output (flagged paths only)
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    gallery_analyzer::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            path,
            blur_threshold,
            algorithm,
            output,
            show,
            tesseract_cmd,
            lang,
            face_model,
            verbose,
        } => run_analyze(
            path,
            blur_threshold,
            algorithm.into(),
            output,
            show,
            tesseract_cmd,
            lang,
            face_model,
            verbose,
        ),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_analyze(
    path: PathBuf,
    blur_threshold: f64,
    algorithm: HashAlgorithmKind,
    output: OutputFormat,
    show: bool,
    tesseract_cmd: String,
    lang: Option<String>,
    face_model: PathBuf,
    verbose: bool,
) -> Result<()> {
    let term = Term::stderr();

    if matches!(output, OutputFormat::Pretty) {
        term.write_line(&format!(
            "{} {}",
            style("Gallery Analyzer").bold().cyan(),
            style(env!("CARGO_PKG_VERSION")).dim()
        ))
        .ok();
        term.write_line("").ok();
    }

    // Build the external engines; both are validated before any pass runs
    let mut ocr = TesseractCli::new().with_command(tesseract_cmd);
    if let Some(lang) = lang {
        ocr = ocr.with_language(lang);
    }

    let faces = SeetaDetector::from_model_file(&face_model)?;

    let mut analyzer = GalleryAnalyzer::builder(path)
        .algorithm(algorithm)
        .blur_threshold(blur_threshold)
        .ocr(Box::new(ocr))
        .faces(Box::new(faces))
        .build()?;

    // Event handling feeds the progress bar from a separate thread
    let (sender, receiver) = EventChannel::new();

    let progress = if matches!(output, OutputFormat::Pretty) {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let progress_clone = progress.clone();
    let verbose_clone = verbose;

    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::List(ListEvent::Completed { total_images }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_images as u64);
                    }
                }
                Event::Pass(PassEvent::Started { pass, total_images }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_length(total_images as u64);
                        pb.set_position(0);
                        pb.set_message(format!("{}", pass));
                    }
                }
                Event::Pass(PassEvent::Progress(p)) => {
                    if let Some(ref pb) = progress_clone {
                        pb.set_position(p.completed as u64);
                        if verbose_clone {
                            pb.set_message(format!(
                                "{} {}",
                                p.pass,
                                p.current_path
                                    .file_name()
                                    .unwrap_or_default()
                                    .to_string_lossy()
                            ));
                        }
                    }
                }
                Event::Analysis(AnalysisEvent::Completed { .. }) => {
                    if let Some(ref pb) = progress_clone {
                        pb.finish_and_clear();
                    }
                }
                _ => {}
            }
        }
    });

    let result = analyzer.run_with_events(&sender);

    // Drop sender to signal the event thread to finish
    drop(sender);
    event_thread.join().ok();

    let report = result?;

    match output {
        OutputFormat::Pretty => print_pretty_results(&term, &report, verbose),
        OutputFormat::Json => print_json_results(&report),
        OutputFormat::Minimal => print_minimal_results(&report),
    }

    let viewer: Box<dyn FindingViewer> = if show {
        Box::new(SystemViewer)
    } else {
        Box::new(NullViewer)
    };
    render_findings(&report, viewer.as_ref());

    Ok(())
}

/// Hand every flagged image to the viewer, with its reason
fn render_findings(report: &GalleryReport, viewer: &dyn FindingViewer) {
    for pair in &report.duplicates {
        viewer.show(&pair.original, "duplicate (original)");
        viewer.show(&pair.duplicate, "duplicate");
    }
    for finding in &report.blurry {
        viewer.show(&finding.path, "blurry");
    }
    for finding in &report.texts {
        viewer.show(&finding.path, "embedded text");
    }
    for finding in &report.faces {
        viewer.show(&finding.path, "faces");
    }
}

fn print_pretty_results(term: &Term, report: &GalleryReport, verbose: bool) {
    term.write_line("").ok();
    term.write_line(&format!("{} Analysis Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} images analyzed in {:.1}s",
        style(report.total_images).cyan(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();
    term.write_line(&format!(
        "  {} duplicate pairs",
        style(report.duplicates.len()).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} blurry images",
        style(report.blurry.len()).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} images with text",
        style(report.texts.len()).cyan()
    ))
    .ok();
    term.write_line(&format!(
        "  {} images with faces",
        style(report.faces.len()).cyan()
    ))
    .ok();
    if !report.skipped.is_empty() {
        term.write_line(&format!(
            "  {} images skipped",
            style(report.skipped.len()).yellow()
        ))
        .ok();
    }
    term.write_line("").ok();

    if !report.duplicates.is_empty() {
        term.write_line(&format!("{}", style("Duplicates:").bold().underlined()))
            .ok();
        for pair in &report.duplicates {
            term.write_line(&format!(
                "  {} {} {} {}",
                style("=").yellow(),
                display_path(&pair.duplicate),
                style("repeats").dim(),
                display_path(&pair.original)
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    if !report.blurry.is_empty() {
        term.write_line(&format!("{}", style("Blurry:").bold().underlined()))
            .ok();
        for finding in &report.blurry {
            term.write_line(&format!(
                "  {} {} {}",
                style("~").yellow(),
                display_path(&finding.path),
                style(format!("(variance {:.1})", finding.score)).dim()
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    if !report.texts.is_empty() {
        term.write_line(&format!("{}", style("Embedded text:").bold().underlined()))
            .ok();
        for finding in &report.texts {
            term.write_line(&format!(
                "  {} {}",
                style("T").yellow(),
                display_path(&finding.path)
            ))
            .ok();
            for line in finding.text.lines() {
                term.write_line(&format!("      {}", style(line).dim())).ok();
            }
        }
        term.write_line("").ok();
    }

    if !report.faces.is_empty() {
        term.write_line(&format!("{}", style("Faces:").bold().underlined()))
            .ok();
        for finding in &report.faces {
            term.write_line(&format!(
                "  {} {} {}",
                style("☺").yellow(),
                display_path(&finding.path),
                style(format!(
                    "({} face{})",
                    finding.count(),
                    if finding.count() == 1 { "" } else { "s" }
                ))
                .dim()
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    if verbose && !report.skipped.is_empty() {
        term.write_line(&format!("{}", style("Skipped:").bold().underlined()))
            .ok();
        for skip in &report.skipped {
            term.write_line(&format!(
                "  {} {} {} {}",
                style("!").red(),
                display_path(&skip.path),
                style(format!("[{}]", skip.pass)).dim(),
                style(&skip.reason).dim()
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    if report.duplicates.is_empty()
        && report.blurry.is_empty()
        && report.texts.is_empty()
        && report.faces.is_empty()
    {
        term.write_line(&format!(
            "  {} Nothing flagged - the gallery looks clean.",
            style("🎉").green()
        ))
        .ok();
    }
}

fn print_json_results(report: &GalleryReport) {
    let output = serde_json::json!({
        "total_images": report.total_images,
        "duration_ms": report.duration_ms,
        "duplicates": report.duplicates,
        "blurry": report.blurry,
        "texts": report.texts,
        "faces": report.faces,
        "skipped": report.skipped,
    });

    println!(
        "{}",
        serde_json::to_string_pretty(&output).expect("report serializes")
    );
}

fn print_minimal_results(report: &GalleryReport) {
    let mut seen = HashSet::new();

    let flagged = report
        .duplicates
        .iter()
        .map(|p| &p.duplicate)
        .chain(report.blurry.iter().map(|f| &f.path))
        .chain(report.texts.iter().map(|f| &f.path))
        .chain(report.faces.iter().map(|f| &f.path));

    for path in flagged {
        if seen.insert(path.clone()) {
            println!("{}", path.display());
        }
    }
}

/// Shorten paths under the home directory to ~/...
fn display_path(path: &std::path::Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
