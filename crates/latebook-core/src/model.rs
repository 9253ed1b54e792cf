//! Record model: students, lateness records, and school metadata.
//!
//! Serde field names stay camelCase to match the historical on-disk JSON
//! produced by earlier versions of the application.

use chrono::{DateTime, Local};
use log::debug;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// A student on the school roster.
///
/// Invariants: `id` is immutable once issued; `name` is never empty once the
/// record is accepted. `grade` and `class_name` may be empty pending
/// assignment (table extraction leaves them blank by design).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique, stable identifier (UUID v4).
    pub id: String,
    /// Full name, non-empty.
    pub name: String,
    /// Free-text grade label, e.g. "الصف الخامس". May be empty.
    #[serde(default)]
    pub grade: String,
    /// Free-text section label, e.g. "5/أ". May be empty.
    #[serde(default)]
    pub class_name: String,
    /// Guardian phone number, digits only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Student {
    /// Create a new student candidate with a fresh id.
    ///
    /// The phone number, if present, is normalized to digits.
    #[must_use]
    pub fn new(name: impl Into<String>, grade: impl Into<String>, class_name: impl Into<String>, phone: Option<String>) -> Self {
        let name = name.into();
        let phone = phone.and_then(|p| {
            let digits = normalize_phone(&p);
            if digits.is_empty() {
                debug!("dropping digitless phone {p:?} for {name}");
                None
            } else {
                Some(digits)
            }
        });
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            grade: grade.into(),
            class_name: class_name.into(),
            phone,
        }
    }
}

/// Strip everything but digits from a phone token.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Disciplinary follow-up recorded against a lateness.
///
/// Closed enumeration; serialized with the historical uppercase tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTaken {
    /// No action recorded.
    #[default]
    #[serde(rename = "NONE")]
    None,
    /// Verbal warning.
    #[serde(rename = "WARNING")]
    Warning,
    /// Written pledge signed by the student.
    #[serde(rename = "PLEDGE")]
    WrittenPledge,
    /// Guardian contacted by phone.
    #[serde(rename = "CALL")]
    GuardianCall,
    /// Guardian summoned to the school.
    #[serde(rename = "SUMMON")]
    GuardianSummon,
    /// Referred to the disciplinary council.
    #[serde(rename = "COUNCIL")]
    DisciplinaryCouncil,
}

impl ActionTaken {
    /// Arabic display label used on printed reports.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "-",
            Self::Warning => "إنذار",
            Self::WrittenPledge => "تعهد خطي",
            Self::GuardianCall => "اتصال بولي الأمر",
            Self::GuardianSummon => "استدعاء ولي الأمر",
            Self::DisciplinaryCouncil => "مجلس سلوكي",
        }
    }
}

impl FromStr for ActionTaken {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "warning" => Ok(Self::Warning),
            "pledge" | "written-pledge" => Ok(Self::WrittenPledge),
            "call" | "guardian-call" => Ok(Self::GuardianCall),
            "summon" | "guardian-summon" => Ok(Self::GuardianSummon),
            "council" | "disciplinary-council" => Ok(Self::DisciplinaryCouncil),
            other => Err(format!("unknown action: {other}")),
        }
    }
}

/// One "this student was late" event.
///
/// The student fields are snapshots taken at creation time and are
/// authoritative for historical reports; they must never be re-derived from
/// the current [`Student`] state. `date_string` is computed once at creation
/// and never recomputed.
///
/// The registration surface is expected to check for an existing record with
/// the same `(student_id, date_string)` before adding a new one, but the data
/// layer does not enforce uniqueness and report aggregation tolerates
/// duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LateRecord {
    /// Unique record identifier.
    pub id: String,
    /// Foreign reference to the student.
    pub student_id: String,
    /// Snapshot of the student's name.
    pub student_name: String,
    /// Snapshot of the student's grade.
    #[serde(default)]
    pub grade: String,
    /// Snapshot of the student's class.
    #[serde(default)]
    pub class_name: String,
    /// Snapshot of the guardian phone, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Creation instant, epoch milliseconds.
    pub timestamp: i64,
    /// Calendar date key `YYYY-MM-DD`, used for filtering.
    pub date_string: String,
    /// Arrival time `HH:MM`. Editable after creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    /// Whether the lateness carries an accepted excuse.
    #[serde(default)]
    pub is_excused: bool,
    /// Disciplinary follow-up.
    #[serde(default)]
    pub action_taken: ActionTaken,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl LateRecord {
    /// Register a lateness for `student` at the given local instant,
    /// snapshotting the student fields.
    #[must_use]
    pub fn register(student: &Student, at: DateTime<Local>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            grade: student.grade.clone(),
            class_name: student.class_name.clone(),
            phone: student.phone.clone(),
            timestamp: at.timestamp_millis(),
            date_string: at.format("%Y-%m-%d").to_string(),
            arrival_time: None,
            is_excused: false,
            action_taken: ActionTaken::None,
            notes: String::new(),
        }
    }
}

/// School metadata printed on report headers and the signature footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolInfo {
    /// School name, printed in the header of every page.
    pub school_name: String,
    /// Manager name, printed in the last-page signature block.
    pub manager_name: String,
    /// Register supervisor name, printed in the last-page signature block.
    pub supervisor_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_student_new_normalizes_phone() {
        let s = Student::new("أحمد علي", "", "", Some("+968 9123-4567".to_string()));
        assert_eq!(s.phone.as_deref(), Some("96891234567"));
        assert!(!s.id.is_empty());
    }

    #[test]
    fn test_student_new_drops_digitless_phone() {
        let s = Student::new("John Smith", "5", "A", Some("n/a".to_string()));
        assert_eq!(s.phone, None);
    }

    #[test]
    fn test_student_ids_are_unique() {
        let a = Student::new("A B C D E", "", "", None);
        let b = Student::new("A B C D E", "", "", None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_register_snapshots_student_fields() {
        let student = Student::new("سالم محمد", "الخامس", "5/أ", Some("96891234567".to_string()));
        let at = Local.with_ymd_and_hms(2024, 1, 5, 7, 30, 0).unwrap();
        let record = LateRecord::register(&student, at);

        assert_eq!(record.student_id, student.id);
        assert_eq!(record.student_name, "سالم محمد");
        assert_eq!(record.grade, "الخامس");
        assert_eq!(record.class_name, "5/أ");
        assert_eq!(record.date_string, "2024-01-05");
        assert_eq!(record.action_taken, ActionTaken::None);
        assert!(!record.is_excused);
    }

    #[test]
    fn test_action_taken_serde_tags() {
        let json = serde_json::to_string(&ActionTaken::WrittenPledge).unwrap();
        assert_eq!(json, "\"PLEDGE\"");
        let back: ActionTaken = serde_json::from_str("\"COUNCIL\"").unwrap();
        assert_eq!(back, ActionTaken::DisciplinaryCouncil);
    }

    #[test]
    fn test_action_taken_from_str() {
        assert_eq!("warning".parse::<ActionTaken>().unwrap(), ActionTaken::Warning);
        assert_eq!(
            "guardian-call".parse::<ActionTaken>().unwrap(),
            ActionTaken::GuardianCall
        );
        assert!("nope".parse::<ActionTaken>().is_err());
    }

    #[test]
    fn test_record_json_uses_camel_case() {
        let student = Student::new("سالم محمد", "الخامس", "5/أ", None);
        let at = Local.with_ymd_and_hms(2024, 1, 5, 7, 30, 0).unwrap();
        let record = LateRecord::register(&student, at);

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("studentName").is_some());
        assert!(json.get("dateString").is_some());
        assert!(json.get("className").is_some());
        assert!(json.get("student_name").is_none());
    }
}
