//! Input format types for the import pipeline
//!
//! The adapter is chosen by file extension or declared MIME type; content is
//! not sniffed beyond that.

use serde::{Deserialize, Serialize};

/// Input document format accepted by the import pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InputFormat {
    /// Spreadsheet workbook (.xlsx, .xlsm)
    Xlsx,
    /// Word-processor document (.docx)
    Docx,
}

impl InputFormat {
    /// Detect format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "xlsx" | "xlsm" => Some(Self::Xlsx),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    /// Detect format from a declared MIME type.
    ///
    /// The import pipeline dispatches on file extension; this helper is for
    /// callers that receive a declared content type instead of a file name
    /// (uploads, share-sheet intents).
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            | "application/vnd.ms-excel.sheet.macroenabled.12" => Some(Self::Xlsx),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(Self::Docx)
            }
            _ => None,
        }
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Docx => "docx",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(InputFormat::from_extension("xlsx"), Some(InputFormat::Xlsx));
        assert_eq!(InputFormat::from_extension("XLSX"), Some(InputFormat::Xlsx));
        assert_eq!(InputFormat::from_extension("xlsm"), Some(InputFormat::Xlsx));
        assert_eq!(InputFormat::from_extension("docx"), Some(InputFormat::Docx));
        assert_eq!(InputFormat::from_extension("pdf"), None);
        assert_eq!(InputFormat::from_extension(""), None);
    }

    #[test]
    fn test_from_mime() {
        assert_eq!(
            InputFormat::from_mime(
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            ),
            Some(InputFormat::Docx)
        );
        assert_eq!(InputFormat::from_mime("text/plain"), None);
    }

    #[test]
    fn test_extension_round_trip() {
        for format in [InputFormat::Xlsx, InputFormat::Docx] {
            assert_eq!(InputFormat::from_extension(format.extension()), Some(format));
        }
    }
}
