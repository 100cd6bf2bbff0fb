//! Tesseract-backed OCR engine.
//!
//! Drives the external `tesseract` binary: `tesseract <image> stdout
//! [-l <lang>]`. The binary location and language are configurable; with
//! no language set, tesseract's own default applies.

use super::TextRecognizer;
use crate::error::OcrError;
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

/// OCR engine backed by the tesseract command-line tool
#[derive(Debug, Clone)]
pub struct TesseractCli {
    /// Executable name or full path
    command: String,
    /// Language code(s) passed via `-l`, e.g. "eng" or "nld+eng"
    language: Option<String>,
}

impl TesseractCli {
    /// Create an engine that expects `tesseract` on PATH
    pub fn new() -> Self {
        Self {
            command: "tesseract".to_string(),
            language: None,
        }
    }

    /// Use a different executable name or path
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the recognition language(s)
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    fn map_spawn_error(&self, e: std::io::Error) -> OcrError {
        if e.kind() == ErrorKind::NotFound {
            OcrError::BinaryNotFound {
                command: self.command.clone(),
            }
        } else {
            OcrError::EngineUnavailable {
                command: self.command.clone(),
                reason: e.to_string(),
            }
        }
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl TextRecognizer for TesseractCli {
    fn probe(&self) -> Result<(), OcrError> {
        let output = Command::new(&self.command)
            .arg("--version")
            .output()
            .map_err(|e| self.map_spawn_error(e))?;

        if output.status.success() {
            Ok(())
        } else {
            Err(OcrError::EngineUnavailable {
                command: self.command.clone(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn recognize(&self, path: &Path) -> Result<String, OcrError> {
        let mut cmd = Command::new(&self.command);
        cmd.arg(path).arg("stdout");
        if let Some(language) = &self.language {
            cmd.args(["-l", language]);
        }

        let output = cmd.output().map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(OcrError::RecognitionFailed {
                path: path.to_path_buf(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| OcrError::InvalidOutput {
            path: path.to_path_buf(),
        })?;

        Ok(clean_output(&text))
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}

/// Trim the surrounding whitespace tesseract pads its output with
fn clean_output(raw: &str) -> String {
    raw.trim().to_string()
}
