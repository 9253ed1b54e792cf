//! Table extraction: rows of cells → student candidates.

use crate::classify::{classify, digits_only, is_header_row, FieldKind};
use latebook_core::{DocumentStructure, Student};
use log::debug;

/// Walk every table of the document and emit one candidate per row that
/// yields a name.
///
/// Rules, in evaluation order:
/// - rows with no non-empty cell are skipped
/// - rows containing a name header keyword are skipped entirely
/// - cells are classified left to right; only the first cell satisfying
///   Phone and the first satisfying Name are accepted per row
/// - a candidate is emitted only when a Name was found; phone is optional
///
/// Grade and class are not derived from document structure — they are left
/// blank for the caller to fill (manual-mode import). This is a deliberate
/// simplification, not an oversight. Candidates come out in table order,
/// then row order; no row carries context from a previous row.
#[must_use]
pub fn extract_tables(structure: &DocumentStructure) -> Vec<Student> {
    let mut students = Vec::new();

    for (table_idx, table) in structure.tables.iter().enumerate() {
        for (row_idx, row) in table.rows.iter().enumerate() {
            if row.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            if is_header_row(row) {
                debug!("skipping header row {row_idx} of table {table_idx}");
                continue;
            }

            let mut name: Option<String> = None;
            let mut phone: Option<String> = None;

            for cell in row {
                let token = cell.trim();
                if token.is_empty() {
                    continue;
                }
                match classify(token) {
                    FieldKind::Phone if phone.is_none() => {
                        phone = Some(digits_only(token));
                    }
                    FieldKind::Name if name.is_none() => {
                        name = Some(token.to_string());
                    }
                    _ => {}
                }
            }

            if let Some(name) = name {
                students.push(Student::new(name, "", "", phone));
            } else {
                debug!("row {row_idx} of table {table_idx} has no name, dropped");
            }
        }
    }

    students
}

#[cfg(test)]
mod tests {
    use super::*;
    use latebook_core::TableBlock;

    fn doc(rows: Vec<Vec<&str>>) -> DocumentStructure {
        DocumentStructure {
            tables: vec![TableBlock {
                rows: rows
                    .into_iter()
                    .map(|r| r.into_iter().map(str::to_string).collect())
                    .collect(),
            }],
            paragraphs: vec![],
        }
    }

    #[test]
    fn test_row_with_name_and_phone() {
        let students = extract_tables(&doc(vec![vec!["1", "أحمد علي محمد", "96891234567"]]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "أحمد علي محمد");
        assert_eq!(students[0].phone.as_deref(), Some("96891234567"));
        assert_eq!(students[0].grade, "");
        assert_eq!(students[0].class_name, "");
    }

    #[test]
    fn test_header_row_yields_nothing() {
        let students = extract_tables(&doc(vec![
            vec!["الاسم", "الهاتف"],
            vec!["أحمد علي محمد", "96891234567"],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "أحمد علي محمد");
    }

    #[test]
    fn test_english_header_row_yields_nothing() {
        let students = extract_tables(&doc(vec![vec!["Name", "Phone"]]));
        assert!(students.is_empty());
    }

    #[test]
    fn test_row_without_name_is_dropped() {
        let students = extract_tables(&doc(vec![vec!["7", "96891234567"]]));
        assert!(students.is_empty());
    }

    #[test]
    fn test_first_plausible_cell_wins() {
        let students = extract_tables(&doc(vec![vec![
            "سالم بن راشد",
            "خالد بن سعيد",
            "96891234567",
            "96899999999",
        ]]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "سالم بن راشد");
        assert_eq!(students[0].phone.as_deref(), Some("96891234567"));
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let students = extract_tables(&doc(vec![
            vec!["", "  "],
            vec!["John Smith"],
        ]));
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].name, "John Smith");
    }

    #[test]
    fn test_ordering_is_table_then_row() {
        let structure = DocumentStructure {
            tables: vec![
                TableBlock {
                    rows: vec![vec!["سالم بن راشد".to_string()]],
                },
                TableBlock {
                    rows: vec![vec!["أحمد علي محمد".to_string()]],
                },
            ],
            paragraphs: vec![],
        };
        let students = extract_tables(&structure);
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].name, "سالم بن راشد");
        assert_eq!(students[1].name, "أحمد علي محمد");
    }

    #[test]
    fn test_never_emits_empty_name() {
        let students = extract_tables(&doc(vec![
            vec!["1", "2", "3"],
            vec!["96891234567"],
            vec!["أحمد علي محمد"],
        ]));
        assert!(students.iter().all(|s| !s.name.is_empty()));
        assert_eq!(students.len(), 1);
    }
}
