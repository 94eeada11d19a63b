//! File classification by declared extension.

use std::path::Path;

/// Supported input formats, classified strictly by lowercase extension.
///
/// Dispatch is a closed enum so adding a format is a compile-time-checked
/// addition rather than another string-match arm scattered through the
/// extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Plain UTF-8 text (`.txt`).
    Text,
    /// Word-processor document (`.docx`).
    Docx,
    /// Portable Document Format (`.pdf`).
    Pdf,
    /// Raster image handed wholesale to OCR (`.jpg`, `.jpeg`, `.png`,
    /// `.gif`, `.bmp`, `.tiff`).
    Image,
}

impl FileKind {
    /// Classify a file by its extension. `None` means unsupported.
    pub fn from_path(path: &Path) -> Option<Self> {
        Self::from_extension(&declared_extension(path))
    }

    /// Classify by a lowercased dotted extension (e.g. `".pdf"`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".txt" => Some(FileKind::Text),
            ".docx" => Some(FileKind::Docx),
            ".pdf" => Some(FileKind::Pdf),
            ".jpg" | ".jpeg" | ".png" | ".gif" | ".bmp" | ".tiff" => Some(FileKind::Image),
            _ => None,
        }
    }
}

/// The extension a file declares, lowercased and with its leading dot.
///
/// Empty string when the path has none; the string is used verbatim in
/// unsupported-type errors.
pub fn declared_extension(path: &Path) -> String {
    match path.extension() {
        Some(ext) => format!(".{}", ext.to_string_lossy().to_lowercase()),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_is_case_insensitive() {
        assert_eq!(
            FileKind::from_path(Path::new("Report.PDF")),
            Some(FileKind::Pdf)
        );
        assert_eq!(
            FileKind::from_path(Path::new("notes.TXT")),
            Some(FileKind::Text)
        );
    }

    #[test]
    fn test_image_extensions() {
        for name in [
            "a.jpg", "a.jpeg", "a.png", "a.gif", "a.bmp", "a.tiff",
        ] {
            assert_eq!(
                FileKind::from_path(Path::new(name)),
                Some(FileKind::Image),
                "{name}"
            );
        }
    }

    #[test]
    fn test_unsupported_and_missing_extensions() {
        assert_eq!(FileKind::from_path(Path::new("archive.xyz")), None);
        assert_eq!(FileKind::from_path(Path::new("no_extension")), None);
    }

    #[test]
    fn test_declared_extension_formatting() {
        assert_eq!(declared_extension(Path::new("scan.TIFF")), ".tiff");
        assert_eq!(declared_extension(Path::new("no_extension")), "");
    }
}
