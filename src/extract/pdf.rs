//! PDF primitives: page counting, native text extraction, rasterization.
//!
//! [`PopplerPdf`] wraps the poppler-utils command-line tools (`pdfinfo`,
//! `pdftotext`, `pdftoppm`). The trait seam keeps the page-fallback state
//! machine testable without poppler installed.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use super::tools::{capture_stdout, run_status, CmdFailure};

/// Render resolution for OCR rasters: 2x the 72 dpi PDF user-space
/// baseline.
const OCR_RENDER_DPI: u32 = 144;

/// Errors from PDF tooling.
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("External tool not found: {0}")]
    ToolNotFound(String),

    #[error("PDF processing failed: {0}")]
    Failed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Per-page PDF operations used by the extractor.
///
/// Pages are numbered from 1, matching poppler's `-f`/`-l` convention.
pub trait PdfBackend {
    /// Number of pages in the document.
    fn page_count(&self, pdf: &Path) -> Result<u32, PdfError>;

    /// Native text of a single page.
    fn page_text(&self, pdf: &Path, page: u32) -> Result<String, PdfError>;

    /// Rasterize a single page into `out_dir`, returning the image path.
    fn render_page(&self, pdf: &Path, page: u32, out_dir: &Path) -> Result<PathBuf, PdfError>;
}

/// PDF backend using the poppler-utils binaries.
pub struct PopplerPdf {
    render_dpi: u32,
}

impl PopplerPdf {
    pub fn new() -> Self {
        Self {
            render_dpi: OCR_RENDER_DPI,
        }
    }

    /// Override the rasterization resolution.
    pub fn with_render_dpi(mut self, dpi: u32) -> Self {
        self.render_dpi = dpi;
        self
    }
}

impl Default for PopplerPdf {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for PopplerPdf {
    fn page_count(&self, pdf: &Path) -> Result<u32, PdfError> {
        let stdout = capture_stdout(Command::new("pdfinfo").arg(pdf))
            .map_err(|e| map_cmd(e, "pdfinfo (install poppler-utils)", "pdfinfo failed"))?;

        stdout
            .lines()
            .find_map(|line| line.strip_prefix("Pages:"))
            .and_then(|rest| rest.trim().parse().ok())
            .ok_or_else(|| PdfError::Failed("pdfinfo reported no page count".to_string()))
    }

    fn page_text(&self, pdf: &Path, page: u32) -> Result<String, PdfError> {
        let page_str = page.to_string();
        capture_stdout(
            Command::new("pdftotext")
                .args(["-layout", "-enc", "UTF-8", "-f", &page_str, "-l", &page_str])
                .arg(pdf)
                .arg("-"), // Output to stdout
        )
        .map_err(|e| {
            map_cmd(
                e,
                "pdftotext (install poppler-utils)",
                &format!("pdftotext failed on page {}", page),
            )
        })
    }

    fn render_page(&self, pdf: &Path, page: u32, out_dir: &Path) -> Result<PathBuf, PdfError> {
        let page_str = page.to_string();
        let dpi = self.render_dpi.to_string();
        run_status(
            Command::new("pdftoppm")
                .args(["-png", "-r", &dpi, "-f", &page_str, "-l", &page_str])
                .arg(pdf)
                .arg(out_dir.join("page")),
        )
        .map_err(|e| {
            map_cmd(
                e,
                "pdftoppm (install poppler-utils)",
                &format!("pdftoppm failed to convert page {}", page),
            )
        })?;

        find_page_image(out_dir, page)
            .ok_or_else(|| PdfError::Failed(format!("No image generated for page {}", page)))
    }
}

fn map_cmd(failure: CmdFailure, tool_hint: &str, error_msg: &str) -> PdfError {
    match failure {
        CmdFailure::NotFound => PdfError::ToolNotFound(tool_hint.to_string()),
        CmdFailure::Failed(stderr) if stderr.is_empty() => PdfError::Failed(error_msg.to_string()),
        CmdFailure::Failed(stderr) => PdfError::Failed(format!("{}: {}", error_msg, stderr)),
        CmdFailure::Io(e) => PdfError::Io(e),
    }
}

/// Find the raster pdftoppm produced for a specific page.
///
/// pdftoppm names files like page-1.png, page-01.png, page-001.png; the
/// zero-padding width depends on the document's total page count.
fn find_page_image(out_dir: &Path, page: u32) -> Option<PathBuf> {
    for digits in [1, 2, 3, 4] {
        let filename = format!("page-{:0width$}.png", page, width = digits);
        let path = out_dir.join(&filename);
        if path.exists() {
            return Some(path);
        }
    }
    None
}
