//! OCR engine abstraction and the Tesseract implementation.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

use super::tools::{capture_stdout, check_binary, CmdFailure};

/// Errors from OCR engines.
#[derive(Debug, Error)]
pub enum OcrError {
    #[error("OCR engine not available: {0}")]
    NotAvailable(String),

    #[error("OCR failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for OCR engines.
///
/// The extractor drives OCR through this seam so alternative engines or
/// instrumented test stubs can be swapped in without touching the
/// page-fallback logic.
pub trait OcrEngine {
    /// Short engine identifier (e.g. "tesseract").
    fn name(&self) -> &'static str;

    /// Check if this engine can actually run (binary installed).
    fn is_available(&self) -> bool;

    /// Extract text from an image file.
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError>;
}

/// Tesseract OCR engine, invoked via the command-line binary.
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    /// Create a Tesseract engine with the default language (`eng`).
    pub fn new() -> Self {
        Self {
            language: "eng".to_string(),
        }
    }

    /// Set the recognition language (Tesseract language code, e.g. "eng",
    /// "chi_sim").
    pub fn with_language(mut self, lang: &str) -> Self {
        self.language = lang.to_string();
        self
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractOcr {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    fn is_available(&self) -> bool {
        check_binary("tesseract")
    }

    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        let result = capture_stdout(
            Command::new("tesseract")
                .arg(image_path)
                .arg("stdout")
                .args(["-l", &self.language]),
        );

        match result {
            Ok(text) => Ok(text),
            Err(CmdFailure::NotFound) => Err(OcrError::NotAvailable(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(CmdFailure::Failed(stderr)) => {
                Err(OcrError::Failed(format!("tesseract failed: {}", stderr)))
            }
            Err(CmdFailure::Io(e)) => Err(OcrError::Io(e)),
        }
    }
}
