//! Note persistence contracts and errors.
//!
//! # Responsibility
//! - Define the storage contract consumed by catalog and session layers.
//! - Keep filesystem details inside the store implementation boundary.
//!
//! # Invariants
//! - Write paths validate note text before touching the filesystem.
//! - Every error carries the failing operation and path; the store never
//!   retries on behalf of the caller.

use crate::model::entry::NoteValidationError;
use crate::model::log_file::LogFile;
use chrono::{NaiveDate, NaiveTime};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

pub mod fs_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-layer error for append, read, list and export operations.
#[derive(Debug)]
pub enum StoreError {
    /// Note text rejected before any I/O.
    ContentInvalid(NoteValidationError),
    /// Filesystem failure, tagged with the operation that failed.
    Io {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },
    /// Advisory lock could not be acquired.
    Lock { path: PathBuf, source: io::Error },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContentInvalid(err) => write!(f, "{err}"),
            Self::Io { op, path, source } => {
                write!(f, "failed to {op} {}: {source}", path.display())
            }
            Self::Lock { path, source } => {
                write!(f, "failed to lock {}: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ContentInvalid(err) => Some(err),
            Self::Io { source, .. } => Some(source),
            Self::Lock { source, .. } => Some(source),
        }
    }
}

impl From<NoteValidationError> for StoreError {
    fn from(value: NoteValidationError) -> Self {
        Self::ContentInvalid(value)
    }
}

/// Storage contract for daily journal logs.
///
/// The filesystem implementation is [`fs_store::FsNoteStore`]; tests may
/// substitute in-memory fakes at this seam.
pub trait NoteStore {
    /// Appends one validated, timestamped entry line to the log for `date`.
    fn append(&self, date: NaiveDate, time: NaiveTime, text: &str) -> StoreResult<()>;

    /// Reads the whole content of one log file. No locking; readers accept
    /// partial trailing content from an in-progress append as staleness.
    fn read(&self, path: &Path) -> StoreResult<String>;

    /// Lists log files matching the daily naming convention, in directory
    /// order. Sorting is the catalog's responsibility.
    fn list(&self) -> StoreResult<Vec<LogFile>>;

    /// Writes the full log tree into a new compressed archive at
    /// `destination`.
    fn export(&self, destination: &Path) -> StoreResult<()>;
}
