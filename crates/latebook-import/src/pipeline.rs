//! Import orchestration: format dispatch, fallback, and grade/class policy.

use crate::traits::RosterBackend;
use crate::{DocxBackend, XlsxBackend};
use latebook_core::{InputFormat, LatebookError, Result, Student};
use log::info;
use std::path::Path;

/// How grade/class are filled on imported candidates.
///
/// The choice is the caller's, not the pipeline's; it is applied uniformly
/// to all candidates of one import call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportMode {
    /// Keep the per-row values as extracted (blank for table extraction).
    Automatic,
    /// Overwrite every candidate's grade/class with a fixed pair.
    Manual {
        /// Grade label applied to every candidate.
        grade: String,
        /// Class label applied to every candidate.
        class_name: String,
    },
}

/// Orchestrates format detection, backend invocation, and post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportPipeline;

impl ImportPipeline {
    /// Create a new pipeline.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Import student candidates from raw document bytes.
    ///
    /// # Errors
    /// - `MissingRequiredSelection` for manual mode without grade/class
    /// - `MalformedDocument` when the bytes cannot be parsed
    /// - `EmptyExtraction` when parsing succeeded but no candidate was found
    pub fn import_bytes(
        &self,
        data: &[u8],
        format: InputFormat,
        mode: &ImportMode,
    ) -> Result<Vec<Student>> {
        if let ImportMode::Manual { grade, class_name } = mode {
            if grade.trim().is_empty() || class_name.trim().is_empty() {
                return Err(LatebookError::MissingRequiredSelection);
            }
        }

        let mut students = match format {
            InputFormat::Xlsx => XlsxBackend::new().extract_bytes(data)?,
            InputFormat::Docx => DocxBackend::new().extract_bytes(data)?,
        };

        if students.is_empty() {
            return Err(LatebookError::EmptyExtraction);
        }

        if let ImportMode::Manual { grade, class_name } = mode {
            for student in &mut students {
                student.grade = grade.clone();
                student.class_name = class_name.clone();
            }
        }

        info!("imported {} candidate(s) from {format:?}", students.len());
        Ok(students)
    }

    /// Import student candidates from a file, detecting the format from the
    /// file extension.
    ///
    /// # Errors
    /// `UnsupportedFormat` for unrecognized extensions, plus everything
    /// [`Self::import_bytes`] can return.
    pub fn import_file<P: AsRef<Path>>(&self, path: P, mode: &ImportMode) -> Result<Vec<Student>> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(InputFormat::from_extension)
            .ok_or_else(|| LatebookError::UnsupportedFormat(path.display().to_string()))?;

        let data = std::fs::read(path)?;
        self.import_bytes(&data, format, mode)
    }
}
