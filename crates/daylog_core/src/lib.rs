//! Core domain logic for daylog.
//! This crate is the single source of truth for journaling invariants.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;

pub use catalog::index::NoteIndex;
pub use config::{Config, ConfigError, DEFAULT_MAX_NOTE_LEN, DEFAULT_NOTES_DIR};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{format_entry_line, validate_note, NoteValidationError};
pub use model::log_file::{file_name_for, parse_file_name, LogFile};
pub use session::event::{Flow, InputEvent};
pub use session::state::{BrowseItem, Mode, Session, ViewModel};
pub use store::fs_store::FsNoteStore;
pub use store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
