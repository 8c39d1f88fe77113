//! In-memory note index.
//!
//! # Responsibility
//! - Hold the current catalog of log files, newest date first.
//! - Filter the catalog by case-insensitive content search.
//!
//! # Invariants
//! - Search preserves catalog order and never mutates the catalog.
//! - Unreadable files are skipped during search, not reported as errors;
//!   one bad file must not abort the whole scan.

use crate::model::log_file::LogFile;
use crate::store::{NoteStore, StoreResult};
use log::{debug, info};
use std::time::Instant;

/// Catalog of known log files, rebuilt from the store on demand.
#[derive(Debug, Default)]
pub struct NoteIndex {
    entries: Vec<LogFile>,
}

impl NoteIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the catalog from the store, sorted by date descending.
    pub fn reload(&mut self, store: &impl NoteStore) -> StoreResult<()> {
        let started_at = Instant::now();
        let mut entries = store.list()?;
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        info!(
            "event=catalog_reload module=catalog status=ok entries={} duration_ms={}",
            entries.len(),
            started_at.elapsed().as_millis()
        );
        self.entries = entries;
        Ok(())
    }

    /// Current catalog, newest date first.
    pub fn entries(&self) -> &[LogFile] {
        &self.entries
    }

    /// Filters the catalog to files whose content contains `query`,
    /// case-insensitively.
    ///
    /// An empty (or whitespace-only) query returns the full catalog
    /// unchanged. Files the store cannot read are treated as not matching.
    pub fn search(&self, store: &impl NoteStore, query: &str) -> Vec<LogFile> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries.clone();
        }

        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|file| match store.read(&file.path) {
                Ok(content) => content.to_lowercase().contains(&needle),
                Err(err) => {
                    debug!(
                        "event=catalog_search module=catalog status=skip path={} error={err}",
                        file.path.display()
                    );
                    false
                }
            })
            .cloned()
            .collect()
    }
}
