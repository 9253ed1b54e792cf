//! `latebook` — school tardiness register.
//!
//! Imports rosters from spreadsheets and word-processor documents, records
//! lateness events, and exports printable PDF reports.

mod store;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use latebook_core::{ActionTaken, LateRecord, ReportKind, ReportSpec};
use latebook_export::{deliver, Delivered, Exporter, Platform, ReportContext};
use latebook_import::{ImportMode, ImportPipeline};
use latebook_report::{aggregate, paginate, report_title, PAGE_ROWS};
use log::warn;
use std::path::PathBuf;
use store::{default_store_path, Store};

#[derive(Parser)]
#[command(name = "latebook", version, about = "School tardiness register")]
struct Cli {
    /// Path to the JSON store file.
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import students from a spreadsheet or word-processor document.
    Import {
        /// Document to import (.xlsx or .docx).
        file: PathBuf,
        /// How grade/class are assigned to imported students.
        #[arg(long, value_enum, default_value_t = Mode::Auto)]
        mode: Mode,
        /// Grade applied to every student (manual mode).
        #[arg(long)]
        grade: Option<String>,
        /// Class applied to every student (manual mode).
        #[arg(long)]
        class: Option<String>,
        /// Replace the existing roster instead of appending.
        #[arg(long)]
        replace: bool,
    },
    /// Record a lateness for a student, dated today.
    Record {
        /// Student id, or a name fragment matching exactly one student.
        student: String,
        /// Arrival time, HH:MM.
        #[arg(long)]
        time: Option<String>,
        /// Mark the lateness as excused.
        #[arg(long)]
        excused: bool,
        /// Disciplinary action (warning, pledge, call, summon, council).
        #[arg(long)]
        action: Option<String>,
        /// Free-text notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Aggregate records and export a PDF report.
    Report {
        /// Report kind.
        #[arg(long, value_enum)]
        kind: Kind,
        /// Date filter, YYYY-MM-DD (daily; defaults to today).
        #[arg(long)]
        date: Option<String>,
        /// Month filter, YYYY-MM (monthly; defaults to this month).
        #[arg(long)]
        month: Option<String>,
        /// Grade filter (by-class).
        #[arg(long)]
        grade: Option<String>,
        /// Class filter (by-class).
        #[arg(long)]
        class: Option<String>,
        /// Student-name search (by-student).
        #[arg(long)]
        student: Option<String>,
        /// Minimum occurrence count (frequency).
        #[arg(long, default_value_t = 3)]
        min_count: usize,
        /// Output directory for the PDF.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// List the student roster.
    Students,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Auto,
    Manual,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kind {
    Daily,
    Monthly,
    ByClass,
    ByStudent,
    Frequency,
}

/// True for a 24-hour `HH:MM` time, the shape stored on records.
fn is_hh_mm(s: &str) -> bool {
    let bytes = s.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if !bytes[..2].iter().all(u8::is_ascii_digit) || !bytes[3..].iter().all(u8::is_ascii_digit) {
        return false;
    }
    let hour: u8 = s[..2].parse().unwrap_or(99);
    let minute: u8 = s[3..].parse().unwrap_or(99);
    hour < 24 && minute < 60
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let store_path = cli.store.unwrap_or_else(default_store_path);

    match cli.command {
        Command::Import { file, mode, grade, class, replace } => {
            let mode = match mode {
                Mode::Auto => ImportMode::Automatic,
                Mode::Manual => ImportMode::Manual {
                    grade: grade.unwrap_or_default(),
                    class_name: class.unwrap_or_default(),
                },
            };
            let students = ImportPipeline::new()
                .import_file(&file, &mode)
                .with_context(|| format!("importing {}", file.display()))?;

            let mut store = Store::load(&store_path)?;
            let count = students.len();
            if replace {
                store.students = students;
            } else {
                store.students.extend(students);
            }
            store.save(&store_path)?;
            println!("imported {count} student(s); roster now has {}", store.students.len());
        }

        Command::Record { student, time, excused, action, notes } => {
            let mut store = Store::load(&store_path)?;
            let found = store.find_student(&student)?.clone();

            let now = Local::now();
            let mut record = LateRecord::register(&found, now);
            if store.has_record_on(&found.id, &record.date_string) {
                warn!(
                    "{} already has a record on {}; adding another",
                    found.name, record.date_string
                );
            }

            if let Some(time) = &time {
                if !is_hh_mm(time) {
                    bail!("--time must be HH:MM (24-hour), got \"{time}\"");
                }
            }
            record.arrival_time = time;
            record.is_excused = excused;
            if let Some(action) = action {
                record.action_taken = action
                    .parse::<ActionTaken>()
                    .map_err(|e| anyhow::anyhow!(e))?;
            }
            record.notes = notes.unwrap_or_default();

            let date = record.date_string.clone();
            store.records.push(record);
            store.save(&store_path)?;
            println!("recorded lateness for {} on {date}", found.name);
        }

        Command::Report { kind, date, month, grade, class, student, min_count, out } => {
            let store = Store::load(&store_path)?;
            let today = Local::now();
            let spec = match kind {
                Kind::Daily => ReportSpec::new(ReportKind::Daily)
                    .with_date(date.unwrap_or_else(|| today.format("%Y-%m-%d").to_string())),
                Kind::Monthly => ReportSpec::new(ReportKind::Monthly)
                    .with_month(month.unwrap_or_else(|| today.format("%Y-%m").to_string())),
                Kind::ByClass => ReportSpec::new(ReportKind::ByClass)
                    .with_grade(grade)
                    .with_class(class),
                Kind::ByStudent => ReportSpec::new(ReportKind::ByStudent)
                    .with_student_query(student.unwrap_or_default()),
                Kind::Frequency => {
                    ReportSpec::new(ReportKind::Frequency).with_min_count(min_count)
                }
            };

            let rows = aggregate(&store.records, &spec);
            if rows.is_empty() {
                bail!("no records match this report");
            }
            let pages = paginate(rows, PAGE_ROWS);

            let title = report_title(&spec);
            let ctx = ReportContext {
                title: title.clone(),
                school: store.school.clone(),
                printed_on: today.format("%Y-%m-%d").to_string(),
            };
            let bytes = Exporter::new()?.export(&pages, &ctx)?;

            let platform = Platform { download_dir: out, share: None };
            match deliver(&bytes, &title, &platform)? {
                Delivered::Saved(path) => println!("saved {}", path.display()),
                Delivered::Shared(dest) => println!("shared via {dest}"),
            }
        }

        Command::Students => {
            let store = Store::load(&store_path)?;
            if store.students.is_empty() {
                println!("roster is empty");
            }
            for s in &store.students {
                let phone = s.phone.as_deref().unwrap_or("-");
                println!("{}  {}  {}/{}  {}", s.id, s.name, s.grade, s.class_name, phone);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::is_hh_mm;

    #[test]
    fn test_arrival_time_shape() {
        assert!(is_hh_mm("07:05"));
        assert!(is_hh_mm("00:00"));
        assert!(is_hh_mm("23:59"));

        assert!(!is_hh_mm("24:00"));
        assert!(!is_hh_mm("07:60"));
        assert!(!is_hh_mm("7:05"));
        assert!(!is_hh_mm("0705"));
        assert!(!is_hh_mm("07:5"));
        assert!(!is_hh_mm("ab:cd"));
        assert!(!is_hh_mm(""));
    }
}
