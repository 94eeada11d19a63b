//! Document text extraction with per-page OCR fallback.
//!
//! Given a file materialized on disk, [`TextExtractor`] classifies it by
//! extension and extracts its plain text: direct reads for text files,
//! container parsing for word-processor documents, page-wise native
//! extraction with OCR fallback for PDFs, and whole-image OCR for raster
//! images. Failures are typed by stage and formatted for direct display,
//! so a batch caller can log them and move on to the next file.

pub mod aggregate;
pub mod extract;

pub use extract::{
    check_binary, ExtractError, FileKind, OcrEngine, OcrError, PdfBackend, PdfError, PopplerPdf,
    TesseractOcr, TextExtractor,
};
