//! Filesystem-backed note store.
//!
//! # Responsibility
//! - Append entries to per-day log files under the configured logs dir.
//! - Read, list and archive those files.
//!
//! # Invariants
//! - Appends hold an exclusive advisory lock for the duration of the write;
//!   the lock is released on every exit path via a drop guard.
//! - Validation failures reject before any filesystem mutation.
//! - Export always finalizes the archive, even when the walk fails mid-way;
//!   a failed walk leaves a closed, possibly partial archive.
//! - No state is kept between calls; the filesystem is the state.

use crate::config::Config;
use crate::model::entry::{format_entry_line, validate_note};
use crate::model::log_file::{file_name_for, LogFile};
use crate::store::{NoteStore, StoreError, StoreResult};
use chrono::{NaiveDate, NaiveTime};
use log::{debug, error, info};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Note store over a `logs/` directory of daily markdown files.
pub struct FsNoteStore {
    config: Config,
}

/// Scoped exclusive flock on an open log file.
///
/// Dropping the guard releases the lock; an unlock failure at that point is
/// unreportable and ignored.
struct FileLockGuard<'a> {
    file: &'a File,
}

impl<'a> FileLockGuard<'a> {
    fn acquire(file: &'a File, path: &Path) -> StoreResult<Self> {
        // Blocks until granted; no timeout is part of the contract.
        fs2::FileExt::lock_exclusive(file).map_err(|source| StoreError::Lock {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file })
    }
}

impl Drop for FileLockGuard<'_> {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(self.file);
    }
}

impl FsNoteStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Resolves the on-disk path for one date's log file.
    pub fn log_path(&self, date: NaiveDate) -> PathBuf {
        self.config.logs_dir().join(file_name_for(date))
    }

    fn append_inner(&self, date: NaiveDate, time: NaiveTime, text: &str) -> StoreResult<()> {
        let text = validate_note(text, self.config.max_note_len)?;

        let path = self.log_path(date);
        let logs_dir = self.config.logs_dir();
        fs::create_dir_all(&logs_dir).map_err(|source| StoreError::Io {
            op: "create directory",
            path: logs_dir,
            source,
        })?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| StoreError::Io {
                op: "open",
                path: path.clone(),
                source,
            })?;

        let _lock = FileLockGuard::acquire(&file, &path)?;

        let line = format_entry_line(time, text);
        (&file)
            .write_all(line.as_bytes())
            .map_err(|source| StoreError::Io {
                op: "write",
                path: path.clone(),
                source,
            })?;

        Ok(())
    }

    fn export_inner(&self, destination: &Path) -> StoreResult<()> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                op: "create backup directory",
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let archive = File::create(destination).map_err(|source| StoreError::Io {
            op: "create archive",
            path: destination.to_path_buf(),
            source,
        })?;
        let mut writer = ZipWriter::new(archive);

        // Finalize regardless of walk outcome so a failed walk still leaves
        // a closed archive rather than a dangling open file.
        let walked = self.write_archive_entries(&mut writer);
        let finished = writer.finish();

        walked?;
        finished.map_err(|err| StoreError::Io {
            op: "finalize archive",
            path: destination.to_path_buf(),
            source: err.into(),
        })?;
        Ok(())
    }

    fn write_archive_entries(&self, writer: &mut ZipWriter<File>) -> StoreResult<()> {
        let base_dir = self.config.base_dir.clone();
        let logs_dir = self.config.logs_dir();

        for entry in WalkDir::new(&logs_dir) {
            let entry = entry.map_err(|err| StoreError::Io {
                op: "walk log directory",
                path: logs_dir.clone(),
                source: walk_error_to_io(err),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let source_path = entry.path();
            // Archive entries keep their relative path under the storage
            // root, so the archive holds the full `logs/...` tree.
            let relative = source_path
                .strip_prefix(&base_dir)
                .unwrap_or(source_path)
                .to_string_lossy()
                .replace('\\', "/");

            writer
                .start_file(relative, SimpleFileOptions::default())
                .map_err(|err| StoreError::Io {
                    op: "write archive entry",
                    path: source_path.to_path_buf(),
                    source: err.into(),
                })?;

            let content = fs::read(source_path).map_err(|source| StoreError::Io {
                op: "read",
                path: source_path.to_path_buf(),
                source,
            })?;
            writer
                .write_all(&content)
                .map_err(|source| StoreError::Io {
                    op: "write archive entry",
                    path: source_path.to_path_buf(),
                    source,
                })?;
        }

        Ok(())
    }
}

impl NoteStore for FsNoteStore {
    fn append(&self, date: NaiveDate, time: NaiveTime, text: &str) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.append_inner(date, time, text) {
            Ok(()) => {
                info!(
                    "event=note_append module=store status=ok date={date} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=note_append module=store status=error date={date} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    fn read(&self, path: &Path) -> StoreResult<String> {
        // Hand-edited logs may carry invalid UTF-8; degrade to replacement
        // characters rather than making the file unreadable.
        let bytes = fs::read(path).map_err(|source| StoreError::Io {
            op: "read",
            path: path.to_path_buf(),
            source,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn list(&self) -> StoreResult<Vec<LogFile>> {
        let logs_dir = self.config.logs_dir();
        let entries = fs::read_dir(&logs_dir).map_err(|source| StoreError::Io {
            op: "list directory",
            path: logs_dir.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                op: "list directory",
                path: logs_dir.clone(),
                source,
            })?;
            let name = entry.file_name();
            if let Some(file) = name
                .to_str()
                .and_then(|name| LogFile::from_dir_entry(&logs_dir, name))
            {
                files.push(file);
            } else {
                debug!(
                    "event=note_list module=store status=skip name={:?}",
                    entry.file_name()
                );
            }
        }
        Ok(files)
    }

    fn export(&self, destination: &Path) -> StoreResult<()> {
        let started_at = Instant::now();
        match self.export_inner(destination) {
            Ok(()) => {
                info!(
                    "event=note_export module=store status=ok destination={} duration_ms={}",
                    destination.display(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=note_export module=store status=error destination={} duration_ms={} error={err}",
                    destination.display(),
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

fn walk_error_to_io(err: walkdir::Error) -> io::Error {
    let message = err.to_string();
    err.into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, message))
}
