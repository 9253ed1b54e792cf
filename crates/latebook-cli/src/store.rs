//! Flat-file JSON persistence for the register.
//!
//! One file holds the whole state. Field names are camelCase for
//! compatibility with the JSON the earlier application versions wrote.

use anyhow::{Context, Result};
use latebook_core::{LateRecord, SchoolInfo, Student};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The persisted register: roster, lateness records, school metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Student roster.
    #[serde(default)]
    pub students: Vec<Student>,
    /// Lateness records, append-mostly.
    #[serde(default)]
    pub records: Vec<LateRecord>,
    /// Names printed on report headers and footers.
    #[serde(default)]
    pub school: SchoolInfo,
}

impl Store {
    /// Load the store from `path`; a missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("store {} not found, starting empty", path.display());
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading store {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing store {}", path.display()))
    }

    /// Write the store back to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        let data = serde_json::to_string_pretty(self).context("serializing store")?;
        fs::write(path, data).with_context(|| format!("writing store {}", path.display()))?;
        debug!(
            "saved store: {} student(s), {} record(s)",
            self.students.len(),
            self.records.len()
        );
        Ok(())
    }

    /// Find a student by exact id, or by case-insensitive name substring
    /// when the id does not match. Ambiguous name matches are rejected.
    pub fn find_student(&self, query: &str) -> Result<&Student> {
        if let Some(student) = self.students.iter().find(|s| s.id == query) {
            return Ok(student);
        }

        let needle = query.to_lowercase();
        let matches: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&needle))
            .collect();

        match matches.as_slice() {
            [one] => Ok(*one),
            [] => anyhow::bail!("no student matches \"{query}\""),
            many => anyhow::bail!(
                "\"{query}\" is ambiguous: {} students match (use an id)",
                many.len()
            ),
        }
    }

    /// True when a record for this student already exists on this date.
    #[must_use]
    pub fn has_record_on(&self, student_id: &str, date_string: &str) -> bool {
        self.records
            .iter()
            .any(|r| r.student_id == student_id && r.date_string == date_string)
    }
}

/// Default store location: `$LATEBOOK_STORE` or `latebook.json` in the
/// working directory.
#[must_use]
pub fn default_store_path() -> PathBuf {
    std::env::var_os("LATEBOOK_STORE")
        .map_or_else(|| PathBuf::from("latebook.json"), PathBuf::from)
}
