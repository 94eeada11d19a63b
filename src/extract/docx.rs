//! DOCX paragraph extraction.
//!
//! A `.docx` file is a ZIP container whose `word/document.xml` part holds
//! the body. Paragraph text is streamed out SAX-style: each `<w:p>`
//! element contributes the concatenation of its `<w:t>` runs, followed by
//! a newline, preserving document order.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use zip::ZipArchive;

/// Path of the main document part inside the container.
const DOCUMENT_PART: &str = "word/document.xml";

/// Errors from DOCX parsing.
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("Failed to open document container: {0}")]
    Container(String),

    #[error("Document part missing: {0}")]
    MissingPart(String),

    #[error("Malformed document XML: {0}")]
    Xml(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract paragraph text from a `.docx` file, one line per paragraph.
pub fn extract_paragraphs(path: &Path) -> Result<String, DocxError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(|e| DocxError::Container(e.to_string()))?;

    let mut xml = Vec::new();
    {
        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|e| DocxError::MissingPart(format!("{}: {}", DOCUMENT_PART, e)))?;
        part.read_to_end(&mut xml)?;
    }

    parse_document_xml(&xml)
}

/// Parse the body XML, concatenating `<w:t>` runs per paragraph.
fn parse_document_xml(xml: &[u8]) -> Result<String, DocxError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::with_capacity(1024);

    let mut text = String::new();
    let mut paragraph = String::new();
    let mut in_paragraph = false;
    let mut in_run_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = true;
                    paragraph.clear();
                }
                b"t" if in_paragraph => in_run_text = true,
                _ => {}
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"p" => {
                    in_paragraph = false;
                    text.push_str(&paragraph);
                    text.push('\n');
                }
                b"t" => in_run_text = false,
                _ => {}
            },
            // Self-closing <w:p/> is an empty paragraph: a bare line.
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"p" => text.push('\n'),
            Ok(Event::Text(ref t)) if in_run_text => {
                let run = t.unescape().map_err(|e| DocxError::Xml(e.to_string()))?;
                paragraph.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(DocxError::Xml(e.to_string())),
        }
        buf.clear();
    }

    Ok(text)
}
