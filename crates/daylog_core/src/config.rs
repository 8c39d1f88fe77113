//! Storage configuration resolution.
//!
//! # Responsibility
//! - Resolve the storage root and note-store settings for a session.
//! - Overlay optional `config.json` values over built-in defaults.
//!
//! # Invariants
//! - Defaults are usable without any config file present.
//! - An unreadable or invalid overlay file is an error, not a silent
//!   fallback to defaults.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io;
use std::path::{Path, PathBuf};

const BASE_DIR_NAME: &str = ".daylog";
const CONFIG_FILE_NAME: &str = "config.json";
const BACKUPS_DIR_NAME: &str = "backups";
const DIAGNOSTICS_DIR_NAME: &str = "diagnostics";

pub const DEFAULT_NOTES_DIR: &str = "logs";
pub const DEFAULT_MAX_NOTE_LEN: usize = 1000;

/// Settings consumed by the note store and session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Storage root; everything the tool writes lives underneath.
    pub base_dir: PathBuf,
    /// Subdirectory name holding the daily log files.
    pub notes_dir: String,
    /// Maximum note length in characters.
    pub max_note_len: usize,
}

/// Optional `config.json` fields. Absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    notes_dir: Option<String>,
    max_note_len: Option<usize>,
}

/// Configuration resolution error. Fatal at startup.
#[derive(Debug)]
pub enum ConfigError {
    /// No home directory could be determined for the default storage root.
    HomeDirUnavailable,
    /// Overlay file exists but could not be read.
    Io { path: PathBuf, source: io::Error },
    /// Overlay file could not be parsed or holds unusable values.
    Invalid { path: PathBuf, message: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HomeDirUnavailable => write!(f, "could not determine the home directory"),
            Self::Io { path, source } => {
                write!(f, "failed to read config file {}: {source}", path.display())
            }
            Self::Invalid { path, message } => {
                write!(f, "invalid config file {}: {message}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Config {
    /// Resolves configuration for the current user: `~/.daylog` as the
    /// storage root, overlaid with `~/.daylog/config.json` when present.
    pub fn resolve() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirUnavailable)?;
        Self::with_base_dir(home.join(BASE_DIR_NAME))
    }

    /// Resolves configuration against an explicit storage root.
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self, ConfigError> {
        let overlay_path = base_dir.join(CONFIG_FILE_NAME);
        let overlay = load_overlay(&overlay_path)?;

        let notes_dir = overlay
            .notes_dir
            .unwrap_or_else(|| DEFAULT_NOTES_DIR.to_string());
        if notes_dir.trim().is_empty() {
            return Err(ConfigError::Invalid {
                path: overlay_path,
                message: "notes_dir cannot be empty".to_string(),
            });
        }

        let max_note_len = overlay.max_note_len.unwrap_or(DEFAULT_MAX_NOTE_LEN);
        if max_note_len == 0 {
            return Err(ConfigError::Invalid {
                path: overlay_path,
                message: "max_note_len must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            base_dir,
            notes_dir,
            max_note_len,
        })
    }

    /// Directory holding the daily log files.
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join(&self.notes_dir)
    }

    /// Directory holding export archives.
    pub fn backups_dir(&self) -> PathBuf {
        self.base_dir.join(BACKUPS_DIR_NAME)
    }

    /// Directory for the application's own diagnostic log files.
    pub fn diagnostics_dir(&self) -> PathBuf {
        self.base_dir.join(DIAGNOSTICS_DIR_NAME)
    }
}

fn load_overlay(path: &Path) -> Result<ConfigOverlay, ConfigError> {
    if !path.exists() {
        return Ok(ConfigOverlay::default());
    }

    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|err| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
