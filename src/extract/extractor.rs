//! Text extraction from heterogeneous documents with per-page OCR
//! fallback.

use std::path::Path;

use tempfile::TempDir;
use thiserror::Error;

use super::docx;
use super::ocr::{OcrEngine, TesseractOcr};
use super::pdf::{PdfBackend, PopplerPdf};
use super::source::{declared_extension, FileKind};
use super::tools::check_binary;

/// Errors surfaced by [`TextExtractor::extract`].
///
/// Each variant is one failure stage; the `Display` form is the
/// user-visible reason and needs no further translation before display or
/// logging.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Source bytes unreadable or undecodable.
    #[error("Failed to read source: {0}")]
    Read(String),

    /// Structured-document container corrupt or unparsable; for PDFs,
    /// native-text tooling failure.
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// Image decode or OCR engine failure. For PDFs, any single page's
    /// OCR failure aborts the whole document.
    #[error("Error during OCR: {0}")]
    Ocr(String),

    /// Extension not in the recognized set; carries the literal extension.
    #[error("Unsupported file type: '{0}'")]
    UnsupportedType(String),
}

/// Outcome of a single PDF page before aggregation.
#[derive(Debug)]
enum PageText {
    /// Native extraction produced non-blank text, kept verbatim.
    Native(String),
    /// Native text was blank; OCR output, possibly empty.
    Ocr(String),
}

/// Extracts plain text from documents, falling back to OCR where a page
/// or file carries no native text.
///
/// Each call owns its scratch storage exclusively and releases it before
/// returning, so extractions may run in parallel threads or processes
/// without locking.
pub struct TextExtractor {
    ocr: Box<dyn OcrEngine>,
    pdf: Box<dyn PdfBackend>,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self {
            ocr: Box::new(TesseractOcr::new()),
            pdf: Box::new(PopplerPdf::new()),
        }
    }
}

impl TextExtractor {
    /// Create an extractor with the default backends (poppler-utils and
    /// Tesseract).
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in a different OCR engine.
    pub fn with_ocr_engine(mut self, ocr: Box<dyn OcrEngine>) -> Self {
        self.ocr = ocr;
        self
    }

    /// Swap in a different PDF backend.
    pub fn with_pdf_backend(mut self, pdf: Box<dyn PdfBackend>) -> Self {
        self.pdf = pdf;
        self
    }

    /// Extract the plain text of `path`, dispatching on its declared
    /// extension.
    ///
    /// The returned text is whitespace-trimmed; it is empty only when the
    /// source genuinely contained no recoverable text, which is a
    /// success, not a failure.
    pub fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let ext = declared_extension(path);
        let Some(kind) = FileKind::from_extension(&ext) else {
            return Err(ExtractError::UnsupportedType(ext));
        };

        tracing::debug!(file = %path.display(), ?kind, "extracting text");

        let text = match kind {
            FileKind::Text => self.extract_plain_text(path)?,
            FileKind::Docx => self.extract_docx(path)?,
            FileKind::Pdf => self.extract_pdf(path)?,
            FileKind::Image => self.extract_image(path)?,
        };

        Ok(text.trim().to_string())
    }

    /// Read a plain-text file as strict UTF-8.
    fn extract_plain_text(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = std::fs::read(path).map_err(|e| ExtractError::Read(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ExtractError::Read(format!("not valid UTF-8: {}", e)))
    }

    fn extract_docx(&self, path: &Path) -> Result<String, ExtractError> {
        docx::extract_paragraphs(path).map_err(|e| ExtractError::Parse(e.to_string()))
    }

    /// Page-wise PDF extraction.
    ///
    /// Each page keeps its native text when that text is non-blank;
    /// otherwise the page is rasterized and OCRed. A page whose OCR fails
    /// aborts the whole document: partial documents are never returned.
    fn extract_pdf(&self, path: &Path) -> Result<String, ExtractError> {
        let page_count = self
            .pdf
            .page_count(path)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        let mut text = String::new();
        for page in 1..=page_count {
            match self.extract_pdf_page(path, page)? {
                PageText::Native(page_text) => text.push_str(&page_text),
                PageText::Ocr(ocr_text) => text.push_str(&ocr_text),
            }
            text.push('\n');
        }

        Ok(text)
    }

    /// Extract one PDF page, deciding between native text and OCR.
    fn extract_pdf_page(&self, path: &Path, page: u32) -> Result<PageText, ExtractError> {
        let native = self
            .pdf
            .page_text(path, page)
            .map_err(|e| ExtractError::Parse(e.to_string()))?;

        if !native.trim().is_empty() {
            return Ok(PageText::Native(native));
        }

        tracing::debug!(page, engine = self.ocr.name(), "no native text, falling back to OCR");

        let scratch = TempDir::new().map_err(|e| ExtractError::Ocr(e.to_string()))?;
        let image_path = self
            .pdf
            .render_page(path, page, scratch.path())
            .map_err(|e| ExtractError::Ocr(e.to_string()))?;

        let ocr_text = self
            .ocr
            .recognize(&image_path)
            .map_err(|e| ExtractError::Ocr(format!("page {}: {}", page, e)))?;

        Ok(PageText::Ocr(ocr_text))
    }

    /// OCR an image file wholesale.
    ///
    /// The image is decoded and re-encoded as PNG in scratch storage so
    /// the OCR engine always sees one normalized format.
    fn extract_image(&self, path: &Path) -> Result<String, ExtractError> {
        let img = image::open(path)
            .map_err(|e| ExtractError::Ocr(format!("failed to decode image: {}", e)))?;

        let scratch = TempDir::new().map_err(|e| ExtractError::Ocr(e.to_string()))?;
        let png_path = scratch.path().join("input.png");
        img.save(&png_path)
            .map_err(|e| ExtractError::Ocr(format!("failed to write scratch image: {}", e)))?;

        self.ocr
            .recognize(&png_path)
            .map_err(|e| ExtractError::Ocr(e.to_string()))
    }

    /// Report availability of the external tools the default backends
    /// use.
    pub fn check_tools() -> Vec<(&'static str, bool)> {
        ["pdftotext", "pdftoppm", "pdfinfo", "tesseract"]
            .into_iter()
            .map(|tool| (tool, check_binary(tool)))
            .collect()
    }
}
