//! Free-text fallback extraction.
//!
//! Used only when no table of the document yields any candidate. Each
//! paragraph block may contribute at most one candidate, and only when both
//! a qualifying name run and a qualifying digit run occur in the same block;
//! requiring co-occurrence avoids false positives from prose unrelated to a
//! student list.

use latebook_core::{DocumentStructure, Student};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// First run of right-to-left letters and spaces of length ≥ 5.
static NAME_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[؀-ۿ\s]{5,}").expect("name run pattern"));

/// First run of ≥ 8 digits.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{8,}").expect("digit run pattern"));

/// Scan paragraph blocks for name/phone pairs.
#[must_use]
pub fn extract_paragraphs(structure: &DocumentStructure) -> Vec<Student> {
    let mut students = Vec::new();

    for block in &structure.paragraphs {
        let name = NAME_RUN
            .find(block)
            .map(|m| m.as_str().trim().to_string())
            .filter(|n| !n.is_empty());
        let phone = DIGIT_RUN.find(block).map(|m| m.as_str().to_string());

        match (name, phone) {
            (Some(name), Some(phone)) => {
                students.push(Student::new(name, "", "", Some(phone)));
            }
            _ => debug!("paragraph without name/phone co-occurrence, discarded"),
        }
    }

    students
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(paragraphs: Vec<&str>) -> DocumentStructure {
        DocumentStructure {
            tables: vec![],
            paragraphs: paragraphs.into_iter().map(str::to_string).collect(),
        }
    }

    #[test]
    fn test_co_occurrence_yields_candidate() {
        let students = extract_paragraphs(&doc(vec!["الطالب أحمد علي محمد هاتف 96891234567"]));
        assert_eq!(students.len(), 1);
        assert!(students[0].name.contains("أحمد علي"));
        assert_eq!(students[0].phone.as_deref(), Some("96891234567"));
    }

    #[test]
    fn test_name_only_is_discarded() {
        assert!(extract_paragraphs(&doc(vec!["الطالب أحمد علي محمد"])).is_empty());
    }

    #[test]
    fn test_phone_only_is_discarded() {
        assert!(extract_paragraphs(&doc(vec!["phone: 96891234567"])).is_empty());
    }

    #[test]
    fn test_short_digit_run_does_not_count() {
        assert!(extract_paragraphs(&doc(vec!["الطالب أحمد علي محمد رقم 1234567"])).is_empty());
    }

    #[test]
    fn test_one_candidate_per_block() {
        let students = extract_paragraphs(&doc(vec![
            "أحمد علي محمد 96891234567 وأيضا سالم راشد 96899999999",
        ]));
        assert_eq!(students.len(), 1);
    }
}
