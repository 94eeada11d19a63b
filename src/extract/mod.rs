//! Text extraction from heterogeneous documents.
//!
//! Extracts plain text using:
//! - direct UTF-8 reads for plain-text files
//! - ZIP container + streaming XML parsing for word-processor documents
//! - pdftotext (Poppler) with per-page Tesseract OCR fallback for PDFs
//! - whole-image Tesseract OCR for raster image files
//!
//! The OCR engine and the PDF tooling sit behind traits so alternative
//! engines or instrumented test stubs can be swapped in without touching
//! the dispatch and fallback logic.

mod docx;
mod extractor;
mod ocr;
mod pdf;
mod source;
mod tools;

pub use extractor::{ExtractError, TextExtractor};
pub use ocr::{OcrEngine, OcrError, TesseractOcr};
pub use pdf::{PdfBackend, PdfError, PopplerPdf};
pub use source::FileKind;
pub use tools::check_binary;
