//! Record filtering, grouping, and ordering.

use latebook_core::{ActionTaken, LateRecord, ReportKind, ReportSpec};
use log::debug;
use std::collections::HashMap;

/// One presentation row derived from a single lateness record.
#[derive(Debug, Clone, PartialEq)]
pub struct LateRow {
    /// Source record id.
    pub record_id: String,
    /// Calendar date `YYYY-MM-DD`.
    pub date: String,
    /// Student name snapshot.
    pub student_name: String,
    /// Grade snapshot.
    pub grade: String,
    /// Class snapshot.
    pub class_name: String,
    /// Arrival time `HH:MM`, if recorded.
    pub arrival_time: Option<String>,
    /// Excused flag.
    pub is_excused: bool,
    /// Disciplinary follow-up.
    pub action_taken: ActionTaken,
    /// Free-text notes.
    pub notes: String,
    /// Creation instant, used for recency ordering.
    pub timestamp: i64,
}

impl From<&LateRecord> for LateRow {
    fn from(record: &LateRecord) -> Self {
        Self {
            record_id: record.id.clone(),
            date: record.date_string.clone(),
            student_name: record.student_name.clone(),
            grade: record.grade.clone(),
            class_name: record.class_name.clone(),
            arrival_time: record.arrival_time.clone(),
            is_excused: record.is_excused,
            action_taken: record.action_taken,
            notes: record.notes.clone(),
            timestamp: record.timestamp,
        }
    }
}

/// One presentation row of a frequency report: a student identity grouped
/// over all records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyRow {
    /// Student name snapshot.
    pub student_name: String,
    /// Grade snapshot.
    pub grade: String,
    /// Class snapshot.
    pub class_name: String,
    /// Number of lateness records for this identity.
    pub count: usize,
    /// Distinct dates, sorted ascending.
    pub dates: Vec<String>,
}

/// A row ready for pagination and rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportRow {
    /// Record projection (daily/monthly/by-class/by-student reports).
    Late(LateRow),
    /// Grouped projection (frequency reports).
    Frequency(FrequencyRow),
}

/// Filter, group, and order records for presentation.
///
/// Records are immutable inputs and may contain duplicates; nothing here
/// assumes uniqueness. Ordering rules:
/// - by-student: most recent first
/// - frequency: count descending, ties in first-encountered order
/// - everything else: grade, then class, then name, ascending
#[must_use]
pub fn aggregate(records: &[LateRecord], spec: &ReportSpec) -> Vec<ReportRow> {
    match spec.kind {
        ReportKind::Frequency => frequency_rows(records, spec.min_count),
        ReportKind::Daily => {
            let mut rows = filter_rows(records, |r| r.date_string == spec.date);
            sort_by_grade_class_name(&mut rows);
            rows.into_iter().map(ReportRow::Late).collect()
        }
        ReportKind::Monthly => {
            let mut rows = filter_rows(records, |r| r.date_string.starts_with(&spec.month));
            sort_by_grade_class_name(&mut rows);
            rows.into_iter().map(ReportRow::Late).collect()
        }
        ReportKind::ByClass => {
            let mut rows = filter_rows(records, |r| {
                spec.grade.as_ref().is_none_or(|g| &r.grade == g)
                    && spec.class_name.as_ref().is_none_or(|c| &r.class_name == c)
            });
            sort_by_grade_class_name(&mut rows);
            rows.into_iter().map(ReportRow::Late).collect()
        }
        ReportKind::ByStudent => {
            // Empty query means empty report, never "show all".
            if spec.student_query.is_empty() {
                return Vec::new();
            }
            let needle = spec.student_query.to_lowercase();
            let mut rows =
                filter_rows(records, |r| r.student_name.to_lowercase().contains(&needle));
            rows.sort_by_key(|row| std::cmp::Reverse(row.timestamp));
            rows.into_iter().map(ReportRow::Late).collect()
        }
    }
}

fn filter_rows<F>(records: &[LateRecord], keep: F) -> Vec<LateRow>
where
    F: Fn(&LateRecord) -> bool,
{
    records.iter().filter(|r| keep(r)).map(LateRow::from).collect()
}

fn sort_by_grade_class_name(rows: &mut [LateRow]) {
    rows.sort_by(|a, b| {
        a.grade
            .cmp(&b.grade)
            .then_with(|| a.class_name.cmp(&b.class_name))
            .then_with(|| a.student_name.cmp(&b.student_name))
    });
}

/// Group ALL records by (name, grade, class) — the date/month filters are
/// ignored for frequency reports — and keep groups at or above the
/// threshold.
fn frequency_rows(records: &[LateRecord], min_count: usize) -> Vec<ReportRow> {
    let mut order: Vec<FrequencyRow> = Vec::new();
    let mut index: HashMap<(String, String, String), usize> = HashMap::new();

    for record in records {
        let key = (
            record.student_name.clone(),
            record.grade.clone(),
            record.class_name.clone(),
        );
        let slot = *index.entry(key).or_insert_with(|| {
            order.push(FrequencyRow {
                student_name: record.student_name.clone(),
                grade: record.grade.clone(),
                class_name: record.class_name.clone(),
                count: 0,
                dates: Vec::new(),
            });
            order.len() - 1
        });

        let row = &mut order[slot];
        row.count += 1;
        if !row.dates.contains(&record.date_string) {
            row.dates.push(record.date_string.clone());
        }
    }

    let before = order.len();
    order.retain(|row| row.count >= min_count);
    debug!("frequency report: {} of {before} group(s) kept", order.len());

    for row in &mut order {
        row.dates.sort();
    }
    // Stable sort keeps first-encountered order among equal counts.
    order.sort_by_key(|row| std::cmp::Reverse(row.count));

    order.into_iter().map(ReportRow::Frequency).collect()
}

/// Printable report title for the given spec.
#[must_use]
pub fn report_title(spec: &ReportSpec) -> String {
    match spec.kind {
        ReportKind::Daily => format!("سجل المتأخرين اليومي ({})", spec.date),
        ReportKind::Monthly => format!("سجل المتأخرين الشهري ({})", spec.month),
        ReportKind::ByClass => {
            let grade = spec.grade.as_deref().unwrap_or("الكل");
            let class = spec.class_name.as_deref().unwrap_or("الكل");
            format!("سجل المتأخرين حسب الصف ({grade} / {class})")
        }
        ReportKind::ByStudent => format!("سجل تأخر الطالب ({})", spec.student_query),
        ReportKind::Frequency => {
            format!("الطلاب متكررو التأخر ({}+ مرات)", spec.min_count)
        }
    }
}
