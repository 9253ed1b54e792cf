//! Error types for import, aggregation, and export operations.
//!
//! Every variant is recoverable at the call site: a failed operation simply
//! does not complete, and no partial output (imported students, half-built
//! PDFs) is ever handed back alongside an error.

use thiserror::Error;

/// Errors produced by the latebook core pipeline.
#[derive(Error, Debug)]
pub enum LatebookError {
    /// The file type is not one the import pipeline recognizes.
    /// The user must pick a different file.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file was recognized but cannot be parsed at all
    /// (corrupt archive, unreadable XML, broken workbook).
    #[error("malformed document: {0}")]
    MalformedDocument(String),

    /// The document parsed cleanly but zero usable records were found.
    /// The user should check the file structure.
    #[error("no records could be extracted from the document")]
    EmptyExtraction,

    /// Manual-mode import was requested without a grade/class selection.
    /// This is caller-side validation, not a pipeline fault.
    #[error("manual import requires both a grade and a class selection")]
    MissingRequiredSelection,

    /// A report page could not be rendered to an image.
    /// Aborts the whole export; no partial document is returned.
    #[error("page rasterization failed: {0}")]
    RasterizationFailure(String),

    /// The output document could not be assembled from rasterized pages.
    /// Aborts the export; no partial file is emitted.
    #[error("document assembly failed: {0}")]
    AssemblyFailure(String),

    /// File I/O error while reading input or delivering output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`LatebookError`].
pub type Result<T> = std::result::Result<T, LatebookError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LatebookError::UnsupportedFormat("pdf".to_string());
        assert_eq!(err.to_string(), "unsupported format: pdf");

        let err = LatebookError::EmptyExtraction;
        assert!(err.to_string().contains("no records"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LatebookError = io.into();
        assert!(matches!(err, LatebookError::Io(_)));
    }
}
