//! Integration tests driving the extractor end to end through
//! instrumented stub backends.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use docsift::{ExtractError, OcrEngine, OcrError, PdfBackend, PdfError, TextExtractor};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// OCR stub returning canned text, recording every image it was handed.
struct RecordingOcr {
    text: String,
    fail: bool,
    calls: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingOcr {
    fn returning(text: &str) -> (Self, Arc<Mutex<Vec<PathBuf>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let stub = Self {
            text: text.to_string(),
            fail: false,
            calls: Arc::clone(&calls),
        };
        (stub, calls)
    }

    fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl OcrEngine for RecordingOcr {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        self.calls.lock().unwrap().push(image_path.to_path_buf());
        if self.fail {
            return Err(OcrError::Failed("engine crashed".to_string()));
        }
        Ok(self.text.clone())
    }
}

/// PDF stub with fixed per-page native text.
struct StubPdf {
    pages: Vec<String>,
}

impl StubPdf {
    fn with_pages(pages: &[&str]) -> Self {
        Self {
            pages: pages.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl PdfBackend for StubPdf {
    fn page_count(&self, _pdf: &Path) -> Result<u32, PdfError> {
        Ok(self.pages.len() as u32)
    }

    fn page_text(&self, _pdf: &Path, page: u32) -> Result<String, PdfError> {
        Ok(self.pages[(page - 1) as usize].clone())
    }

    fn render_page(&self, _pdf: &Path, page: u32, out_dir: &Path) -> Result<PathBuf, PdfError> {
        let path = out_dir.join(format!("page-{}.png", page));
        std::fs::write(&path, b"stub raster")?;
        Ok(path)
    }
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let mut body = String::new();
    for p in paragraphs {
        body.push_str(&format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", p));
    }
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let file = std::fs::File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(xml.as_bytes()).unwrap();
    writer.finish().unwrap();
}

#[test]
fn pdf_with_native_text_on_every_page_never_invokes_ocr() {
    let (ocr, calls) = RecordingOcr::returning("should never appear");
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(ocr))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&[
            "Cover letter\n",
            "Income certification body\n",
        ])));

    let text = extractor.extract(Path::new("packet.pdf")).unwrap();
    assert_eq!(text, "Cover letter\n\nIncome certification body");
    assert!(calls.lock().unwrap().is_empty());
}

#[test]
fn blank_pdf_page_falls_back_to_ocr_for_that_page_only() {
    let (ocr, calls) = RecordingOcr::returning("scanned wage statement");
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(ocr))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&[
            "page one text",
            "   \n",
            "page three text",
        ])));

    let text = extractor.extract(Path::new("packet.pdf")).unwrap();
    assert_eq!(text, "page one text\nscanned wage statement\npage three text");
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn pdf_ocr_failure_on_one_page_aborts_the_whole_document() {
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(RecordingOcr::failing()))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&["intro", "", "outro"])));

    let err = extractor.extract(Path::new("packet.pdf")).unwrap_err();
    assert!(matches!(err, ExtractError::Ocr(_)), "{err}");
    assert!(err.to_string().contains("engine crashed"), "{err}");
}

#[test]
fn blank_page_with_empty_ocr_output_is_a_success() {
    let (ocr, calls) = RecordingOcr::returning("");
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(ocr))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&[""])));

    let text = extractor.extract(Path::new("blank.pdf")).unwrap();
    assert_eq!(text, "");
    assert_eq!(calls.lock().unwrap().len(), 1);
}

#[test]
fn extraction_is_idempotent() {
    let (ocr, _calls) = RecordingOcr::returning("recovered text");
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(ocr))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&["first page", ""])));

    let first = extractor.extract(Path::new("packet.pdf")).unwrap();
    let second = extractor.extract(Path::new("packet.pdf")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn uppercase_extension_dispatches_like_lowercase() {
    let (ocr, _calls) = RecordingOcr::returning("");
    let extractor = TextExtractor::new()
        .with_ocr_engine(Box::new(ocr))
        .with_pdf_backend(Box::new(StubPdf::with_pages(&["Body text"])));

    let text = extractor.extract(Path::new("PACKET.PDF")).unwrap();
    assert_eq!(text, "Body text");
}

#[test]
fn docx_paragraphs_come_out_newline_separated_in_order() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("certification.docx");
    write_docx(
        &path,
        &[
            "Household members: 2",
            "Total annual income: 31,200",
            "Determination: eligible",
        ],
    );

    let text = TextExtractor::new().extract(&path).unwrap();
    assert_eq!(
        text,
        "Household members: 2\nTotal annual income: 31,200\nDetermination: eligible"
    );
}

#[test]
fn docx_without_document_part_is_parse_failure() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("hollow.docx");

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("word/styles.xml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(b"<w:styles/>").unwrap();
    writer.finish().unwrap();

    let err = TextExtractor::new().extract(&path).unwrap_err();
    assert!(matches!(err, ExtractError::Parse(_)), "{err}");
}
