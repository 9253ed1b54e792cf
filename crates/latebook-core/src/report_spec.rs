//! Report configuration: kind selection plus filter values.

use serde::{Deserialize, Serialize};

/// Which report is being produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportKind {
    /// Records for a single calendar date.
    Daily,
    /// Records for a single `YYYY-MM` month.
    Monthly,
    /// Records for a grade and/or class; neither given means all.
    ByClass,
    /// Records whose student name contains a search substring.
    ByStudent,
    /// Students grouped over all records, filtered by occurrence count.
    Frequency,
}

/// Filter/sort configuration for one aggregation run.
///
/// A flat options struct with builder-style setters; only the fields relevant
/// to `kind` are consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSpec {
    /// Report kind.
    pub kind: ReportKind,
    /// Calendar date `YYYY-MM-DD` (daily reports).
    pub date: String,
    /// Month key `YYYY-MM` (monthly reports).
    pub month: String,
    /// Grade filter (by-class reports).
    pub grade: Option<String>,
    /// Class filter (by-class reports).
    pub class_name: Option<String>,
    /// Case-insensitive student-name substring (by-student reports).
    /// An empty query yields an empty report, not "show all".
    pub student_query: String,
    /// Minimum occurrence count (frequency reports).
    pub min_count: usize,
}

impl ReportSpec {
    /// New spec for the given kind with no filters set.
    #[must_use]
    pub const fn new(kind: ReportKind) -> Self {
        Self {
            kind,
            date: String::new(),
            month: String::new(),
            grade: None,
            class_name: None,
            student_query: String::new(),
            min_count: 3,
        }
    }

    /// Set the daily report date (`YYYY-MM-DD`).
    #[must_use]
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Set the monthly report key (`YYYY-MM`).
    #[must_use]
    pub fn with_month(mut self, month: impl Into<String>) -> Self {
        self.month = month.into();
        self
    }

    /// Set the grade filter.
    #[must_use]
    pub fn with_grade(mut self, grade: Option<String>) -> Self {
        self.grade = grade;
        self
    }

    /// Set the class filter.
    #[must_use]
    pub fn with_class(mut self, class_name: Option<String>) -> Self {
        self.class_name = class_name;
        self
    }

    /// Set the student-name search substring.
    #[must_use]
    pub fn with_student_query(mut self, query: impl Into<String>) -> Self {
        self.student_query = query.into();
        self
    }

    /// Set the minimum occurrence threshold for frequency reports.
    #[must_use]
    pub const fn with_min_count(mut self, min_count: usize) -> Self {
        self.min_count = min_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_chain() {
        let spec = ReportSpec::new(ReportKind::ByClass)
            .with_grade(Some("الخامس".to_string()))
            .with_class(Some("5/أ".to_string()));
        assert_eq!(spec.kind, ReportKind::ByClass);
        assert_eq!(spec.grade.as_deref(), Some("الخامس"));
        assert_eq!(spec.class_name.as_deref(), Some("5/أ"));
    }

    #[test]
    fn test_default_min_count() {
        assert_eq!(ReportSpec::new(ReportKind::Frequency).min_count, 3);
    }
}
