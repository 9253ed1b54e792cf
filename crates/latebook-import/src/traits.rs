//! Trait definition for roster import backends.

use latebook_core::{InputFormat, Result, Student};
use std::path::Path;

/// A format-specific backend that extracts student candidates from raw bytes.
///
/// Candidates are tentative: they carry fresh ids and normalized fields but
/// are not persisted; that belongs to the caller.
pub trait RosterBackend {
    /// The format this backend handles.
    fn format(&self) -> InputFormat;

    /// Extract student candidates from document bytes.
    ///
    /// An empty result is not an error at this level; the pipeline decides
    /// whether to fall back or report `EmptyExtraction`.
    ///
    /// # Errors
    /// Returns `MalformedDocument` when the bytes cannot be parsed at all.
    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<Student>>;

    /// Extract student candidates from a file on disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Student>> {
        let data = std::fs::read(path)?;
        self.extract_bytes(&data)
    }
}
