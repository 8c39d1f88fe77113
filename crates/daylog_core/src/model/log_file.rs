//! Per-day log file identity.
//!
//! # Responsibility
//! - Map calendar dates to the `MM-DD-YYYY.md` daily filename and back.
//! - Carry the on-disk location alongside the date key.
//!
//! # Invariants
//! - At most one log file exists per date; the filename is derived
//!   deterministically from the date.
//! - Files whose names do not match the daily convention are not log files
//!   and never enter the catalog.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static LOG_FILE_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})\.md$").expect("valid log filename regex"));

/// One calendar day's journal file.
///
/// Created lazily by the store on first append for that date; never deleted
/// by the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    /// Identity key. One file per date.
    pub date: NaiveDate,
    /// Location under the storage root.
    pub path: PathBuf,
}

impl LogFile {
    /// Builds the log file reference for `date` inside `logs_dir`.
    pub fn for_date(logs_dir: &Path, date: NaiveDate) -> Self {
        Self {
            path: logs_dir.join(file_name_for(date)),
            date,
        }
    }

    /// Recognizes a directory entry as a daily log file.
    ///
    /// Returns `None` when `name` does not match the daily naming
    /// convention or encodes an impossible date.
    pub fn from_dir_entry(logs_dir: &Path, name: &str) -> Option<Self> {
        let date = parse_file_name(name)?;
        Some(Self {
            path: logs_dir.join(name),
            date,
        })
    }

    /// Display title used by list surfaces.
    pub fn title(&self) -> String {
        file_name_for(self.date)
    }
}

/// Derives the daily filename (`MM-DD-YYYY.md`) for a date.
pub fn file_name_for(date: NaiveDate) -> String {
    format!("{}.md", date.format("%m-%d-%Y"))
}

/// Parses a daily filename back into its date.
///
/// Returns `None` for names outside the convention and for matching names
/// that encode an invalid calendar date (for example `02-30-2024.md`).
pub fn parse_file_name(name: &str) -> Option<NaiveDate> {
    let caps = LOG_FILE_NAME_RE.captures(name)?;
    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::{file_name_for, parse_file_name, LogFile};
    use chrono::NaiveDate;
    use std::path::Path;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn file_name_uses_month_day_year_order() {
        assert_eq!(file_name_for(date(2024, 3, 5)), "03-05-2024.md");
    }

    #[test]
    fn parse_round_trips_generated_names() {
        let d = date(2023, 12, 31);
        assert_eq!(parse_file_name(&file_name_for(d)), Some(d));
    }

    #[test]
    fn parse_rejects_foreign_names_and_impossible_dates() {
        assert_eq!(parse_file_name("notes.md"), None);
        assert_eq!(parse_file_name("2024-03-05.md"), None);
        assert_eq!(parse_file_name("03-05-2024.txt"), None);
        assert_eq!(parse_file_name("02-30-2024.md"), None);
    }

    #[test]
    fn dir_entry_recognition_builds_full_path() {
        let logs = Path::new("/store/logs");
        let file = LogFile::from_dir_entry(logs, "01-02-2025.md").expect("valid entry");
        assert_eq!(file.date, date(2025, 1, 2));
        assert_eq!(file.path, logs.join("01-02-2025.md"));
        assert_eq!(file.title(), "01-02-2025.md");
    }
}
