//! Spreadsheet backend using calamine.
//!
//! Reads the first worksheet only. The first row of the used range is the
//! header row; columns are resolved against prioritized alias lists with
//! case-sensitive exact matching, first matching alias wins. Rows lacking a
//! resolvable name are dropped.

use crate::traits::RosterBackend;
use calamine::{Data, Reader, Xlsx};
use latebook_core::{model::normalize_phone, InputFormat, LatebookError, Result, Student};
use log::{debug, warn};
use std::io::Cursor;

/// Recognized header aliases, in priority order.
const NAME_ALIASES: [&str; 3] = ["الاسم", "Name", "اسم الطالب"];
const GRADE_ALIASES: [&str; 3] = ["الصف", "Grade", "المرحلة"];
const CLASS_ALIASES: [&str; 3] = ["الفصل", "Class", "الشعبة"];
const PHONE_ALIASES: [&str; 5] = ["الهاتف", "رقم الهاتف", "الجوال", "Phone", "Mobile"];

/// Backend for spreadsheet rosters (.xlsx, .xlsm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct XlsxBackend;

/// Resolved column indices for the recognized fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ColumnMap {
    name: Option<usize>,
    grade: Option<usize>,
    class: Option<usize>,
    phone: Option<usize>,
}

impl XlsxBackend {
    /// Create a new spreadsheet backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Find the column whose header equals the first matching alias.
    fn resolve_column(headers: &[String], aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| headers.iter().position(|h| h == alias))
    }

    fn resolve_columns(headers: &[String]) -> ColumnMap {
        ColumnMap {
            name: Self::resolve_column(headers, &NAME_ALIASES),
            grade: Self::resolve_column(headers, &GRADE_ALIASES),
            class: Self::resolve_column(headers, &CLASS_ALIASES),
            phone: Self::resolve_column(headers, &PHONE_ALIASES),
        }
    }

    /// Render a worksheet cell as trimmed text.
    ///
    /// Excel stores phone numbers as floats; whole floats are rendered
    /// without the trailing `.0`.
    fn cell_text(cell: &Data) -> String {
        match cell {
            Data::Empty => String::new(),
            Data::String(s) => s.trim().to_string(),
            Data::Int(i) => i.to_string(),
            Data::Float(f) => {
                #[allow(clippy::cast_possible_truncation)]
                if f.fract() == 0.0 && f.abs() < 9.0e15 {
                    (*f as i64).to_string()
                } else {
                    f.to_string()
                }
            }
            Data::Bool(b) => b.to_string(),
            Data::DateTimeIso(s) | Data::DurationIso(s) => s.trim().to_string(),
            Data::DateTime(dt) => dt.to_string(),
            Data::Error(_) => String::new(),
        }
    }

    /// Map text rows (header first) to student candidates.
    ///
    /// Split out from the calamine shell so the mapping rules are testable
    /// without a workbook on disk.
    fn map_rows(rows: &[Vec<String>]) -> Vec<Student> {
        let Some((headers, data_rows)) = rows.split_first() else {
            return Vec::new();
        };

        let columns = Self::resolve_columns(headers);
        if columns.name.is_none() {
            warn!("no recognized name header in sheet, all rows will drop");
        }

        let mut students = Vec::new();
        for row in data_rows {
            let field = |idx: Option<usize>| -> String {
                idx.and_then(|i| row.get(i))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default()
            };

            let name = field(columns.name);
            if name.is_empty() {
                debug!("dropping spreadsheet row without a resolvable name");
                continue;
            }

            let phone = field(columns.phone);
            let phone = if phone.is_empty() {
                None
            } else {
                Some(normalize_phone(&phone)).filter(|p| !p.is_empty())
            };

            students.push(Student::new(
                name,
                field(columns.grade),
                field(columns.class),
                phone,
            ));
        }
        students
    }
}

impl RosterBackend for XlsxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Xlsx
    }

    fn extract_bytes(&self, data: &[u8]) -> Result<Vec<Student>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data.to_vec()))
            .map_err(|e| LatebookError::MalformedDocument(format!("cannot open workbook: {e}")))?;

        // First sheet only; additional sheets are ignored by design.
        let Some(range) = workbook.worksheet_range_at(0) else {
            return Ok(Vec::new());
        };
        let range = range
            .map_err(|e| LatebookError::MalformedDocument(format!("cannot read worksheet: {e}")))?;

        let rows: Vec<Vec<String>> = range
            .rows()
            .map(|row| row.iter().map(Self::cell_text).collect())
            .collect();

        Ok(Self::map_rows(&rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(raw: Vec<Vec<&str>>) -> Vec<Vec<String>> {
        raw.into_iter()
            .map(|r| r.into_iter().map(str::to_string).collect())
            .collect()
    }

    #[test]
    fn test_scenario_a_arabic_headers() {
        let students = XlsxBackend::map_rows(&rows(vec![
            vec!["الاسم", "الصف", "الهاتف"],
            vec!["أحمد علي", "5/أ", "96891234567"],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "أحمد علي");
        assert_eq!(students[0].grade, "5/أ");
        assert_eq!(students[0].phone.as_deref(), Some("96891234567"));
    }

    #[test]
    fn test_english_headers() {
        let students = XlsxBackend::map_rows(&rows(vec![
            vec!["Name", "Grade", "Class", "Mobile"],
            vec!["John Smith", "5", "A", "+968 9123 4567"],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].grade, "5");
        assert_eq!(students[0].class_name, "A");
        assert_eq!(students[0].phone.as_deref(), Some("96891234567"));
    }

    #[test]
    fn test_first_matching_alias_wins() {
        // "الاسم" outranks "اسم الطالب" even when both are present.
        let students = XlsxBackend::map_rows(&rows(vec![
            vec!["اسم الطالب", "الاسم"],
            vec!["WRONG NAME", "أحمد علي"],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "أحمد علي");
    }

    #[test]
    fn test_alias_match_is_exact_and_case_sensitive() {
        let students = XlsxBackend::map_rows(&rows(vec![
            vec!["name", "NAME "],
            vec!["John Smith", "Jane Doe"],
        ]));
        assert!(students.is_empty());
    }

    #[test]
    fn test_rows_without_name_drop() {
        let students = XlsxBackend::map_rows(&rows(vec![
            vec!["الاسم", "الهاتف"],
            vec!["", "96891234567"],
            vec!["أحمد علي", ""],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "أحمد علي");
        assert_eq!(students[0].phone, None);
    }

    #[test]
    fn test_empty_sheet() {
        assert!(XlsxBackend::map_rows(&[]).is_empty());
    }

    #[test]
    fn test_float_cell_renders_without_fraction() {
        assert_eq!(XlsxBackend::cell_text(&Data::Float(96891234567.0)), "96891234567");
        assert_eq!(XlsxBackend::cell_text(&Data::Float(1.5)), "1.5");
        assert_eq!(XlsxBackend::cell_text(&Data::String("  x ".to_string())), "x");
        assert_eq!(XlsxBackend::cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_malformed_workbook() {
        let backend = XlsxBackend::new();
        let err = backend.extract_bytes(b"not a zip archive").unwrap_err();
        assert!(matches!(err, LatebookError::MalformedDocument(_)));
    }
}
