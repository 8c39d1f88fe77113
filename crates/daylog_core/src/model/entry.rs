//! Note entry validation and line formatting.
//!
//! # Responsibility
//! - Validate user-supplied note text before any I/O happens.
//! - Format the committed single-line entry (`- [HH:MM] <text>`).
//!
//! # Invariants
//! - Validation rejects empty (after trimming) and over-length text; the
//!   length limit is counted in characters, not bytes.
//! - A committed entry is exactly one line, terminated by `\n`.

use chrono::NaiveTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejection reason for note text, produced before any filesystem mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Text is empty after trimming leading/trailing whitespace.
    Empty,
    /// Trimmed text exceeds the configured maximum length.
    TooLong { length: usize, max: usize },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "note is empty"),
            Self::TooLong { length, max } => {
                write!(f, "note too long: {length} characters, maximum is {max}")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// Validates note text and returns the trimmed slice to commit.
///
/// # Errors
/// - `Empty` when nothing remains after trimming.
/// - `TooLong` when the trimmed text exceeds `max_len` characters.
pub fn validate_note(text: &str, max_len: usize) -> Result<&str, NoteValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NoteValidationError::Empty);
    }
    let length = trimmed.chars().count();
    if length > max_len {
        return Err(NoteValidationError::TooLong {
            length,
            max: max_len,
        });
    }
    Ok(trimmed)
}

/// Formats one committed entry line with its time-of-day prefix.
///
/// The caller passes already-validated (trimmed) text.
pub fn format_entry_line(time: NaiveTime, text: &str) -> String {
    format!("- [{}] {text}\n", time.format("%H:%M"))
}

#[cfg(test)]
mod tests {
    use super::{format_entry_line, validate_note, NoteValidationError};
    use chrono::NaiveTime;

    #[test]
    fn validate_trims_surrounding_whitespace() {
        assert_eq!(validate_note("  bought milk \n", 1000), Ok("bought milk"));
    }

    #[test]
    fn validate_rejects_blank_input() {
        assert_eq!(validate_note("   \t ", 1000), Err(NoteValidationError::Empty));
        assert_eq!(validate_note("", 1000), Err(NoteValidationError::Empty));
    }

    #[test]
    fn validate_counts_characters_not_bytes() {
        // Four multi-byte characters fit a limit of four.
        assert!(validate_note("日記録音", 4).is_ok());
        assert_eq!(
            validate_note("日記録音簿", 4),
            Err(NoteValidationError::TooLong { length: 5, max: 4 })
        );
    }

    #[test]
    fn entry_line_matches_committed_format() {
        let time = NaiveTime::from_hms_opt(14, 7, 33).expect("valid test time");
        assert_eq!(
            format_entry_line(time, "bought milk"),
            "- [14:07] bought milk\n"
        );
    }
}
