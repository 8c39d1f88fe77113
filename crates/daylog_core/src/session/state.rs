//! Modal state machine over store and catalog.
//!
//! # Responsibility
//! - Track the current mode and the data belonging to it.
//! - Translate input events into store/catalog commands and state
//!   transitions.
//! - Expose per-state read-only view models to the presentation layer.
//!
//! # Invariants
//! - Each mode carries only its own data; there is no cross-mode field
//!   reuse.
//! - A pending error is cleared by consuming the next input event; resize
//!   applies in every state, never changes the mode and never consumes an
//!   error.
//! - A failed append keeps Compose active with the buffer intact.

use crate::catalog::index::NoteIndex;
use crate::config::Config;
use crate::model::log_file::LogFile;
use crate::session::event::{Flow, InputEvent};
use crate::store::{NoteStore, StoreError};
use chrono::Local;
use log::warn;
use std::path::{Path, PathBuf};

/// Rows of list chrome (title, footer) subtracted from the terminal height
/// when paging.
const LIST_CHROME_ROWS: u16 = 4;

/// Current interaction mode, carrying only the data relevant to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the catalog. Initial state.
    Browse,
    /// Entering a new note.
    Compose { buffer: String },
    /// Reading one log file.
    View {
        title: String,
        content: String,
        scroll: usize,
    },
    /// Entering a search query for a filtered Browse.
    Search { query: String },
}

/// Active content filter over the catalog.
#[derive(Debug, Clone)]
struct ActiveFilter {
    query: String,
    items: Vec<LogFile>,
}

/// One Browse list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseItem<'a> {
    pub title: String,
    pub path: &'a Path,
}

/// Read-only snapshot of the session for rendering.
///
/// Text-entry variants (`Compose`, `Search`) also tell the presentation
/// layer to map printable keys to [`InputEvent::Char`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewModel<'a> {
    Browse {
        items: Vec<BrowseItem<'a>>,
        selected: usize,
        filter: Option<&'a str>,
        error: Option<&'a str>,
    },
    Compose {
        buffer: &'a str,
        error: Option<&'a str>,
    },
    View {
        title: &'a str,
        content: &'a str,
        scroll: usize,
        error: Option<&'a str>,
    },
    Search {
        query: &'a str,
        error: Option<&'a str>,
    },
}

/// The modal interaction session.
///
/// Processes one event at a time to completion; store calls are synchronous
/// and block the session for their duration.
pub struct Session<S: NoteStore> {
    store: S,
    index: NoteIndex,
    backups_dir: PathBuf,
    mode: Mode,
    selected: usize,
    filter: Option<ActiveFilter>,
    last_error: Option<String>,
    width: u16,
    height: u16,
}

impl<S: NoteStore> Session<S> {
    /// Creates a session in Browse mode and loads the initial catalog.
    ///
    /// A failed initial reload is recorded like any other session error,
    /// not escalated; only startup directory preparation (outside the
    /// session) is fatal.
    pub fn new(store: S, config: &Config) -> Self {
        let mut session = Self {
            store,
            index: NoteIndex::new(),
            backups_dir: config.backups_dir(),
            mode: Mode::Browse,
            selected: 0,
            filter: None,
            last_error: None,
            width: 0,
            height: 0,
        };
        session.refresh_catalog();
        session
    }

    /// Routes one input event, returning whether the loop continues.
    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        if let InputEvent::Resize { width, height } = event {
            self.width = width;
            self.height = height;
            return Flow::Continue;
        }

        // Surfaced-at-least-once rule: the event that follows a recorded
        // error acknowledges it and is otherwise consumed.
        if self.last_error.take().is_some() {
            return Flow::Continue;
        }

        match self.mode {
            Mode::Browse => self.on_browse(event),
            Mode::Compose { .. } => self.on_compose(event),
            Mode::View { .. } => self.on_view(event),
            Mode::Search { .. } => self.on_search(event),
        }
    }

    /// Last terminal geometry reported via [`InputEvent::Resize`].
    pub fn viewport(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Snapshot of the current state for rendering.
    pub fn view(&self) -> ViewModel<'_> {
        let error = self.last_error.as_deref();
        match &self.mode {
            Mode::Browse => ViewModel::Browse {
                items: self
                    .visible()
                    .iter()
                    .map(|file| BrowseItem {
                        title: file.title(),
                        path: file.path.as_path(),
                    })
                    .collect(),
                selected: self.selected,
                filter: self.filter.as_ref().map(|filter| filter.query.as_str()),
                error,
            },
            Mode::Compose { buffer } => ViewModel::Compose { buffer, error },
            Mode::View {
                title,
                content,
                scroll,
            } => ViewModel::View {
                title,
                content,
                scroll: *scroll,
                error,
            },
            Mode::Search { query } => ViewModel::Search { query, error },
        }
    }

    fn on_browse(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Exit,
            InputEvent::BeginCompose => {
                self.mode = Mode::Compose {
                    buffer: String::new(),
                };
            }
            InputEvent::BeginSearch => {
                let query = self
                    .filter
                    .as_ref()
                    .map(|filter| filter.query.clone())
                    .unwrap_or_default();
                self.mode = Mode::Search { query };
            }
            InputEvent::TriggerBackup => self.run_backup(),
            InputEvent::Confirm => self.open_selected(),
            InputEvent::MoveUp => self.move_selection(-1),
            InputEvent::MoveDown => self.move_selection(1),
            InputEvent::PageUp => self.move_selection(-(self.page_len() as isize)),
            InputEvent::PageDown => self.move_selection(self.page_len() as isize),
            _ => {}
        }
        Flow::Continue
    }

    fn on_compose(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Cancel => self.mode = Mode::Browse,
            InputEvent::Confirm => self.commit_note(),
            InputEvent::Char(c) => {
                if let Mode::Compose { buffer } = &mut self.mode {
                    buffer.push(c);
                }
            }
            InputEvent::Backspace => {
                if let Mode::Compose { buffer } = &mut self.mode {
                    buffer.pop();
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn on_view(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Exit,
            InputEvent::Back | InputEvent::Cancel => {
                self.mode = Mode::Browse;
                return Flow::Continue;
            }
            _ => {}
        }

        let page = self.page_len();
        if let Mode::View {
            content, scroll, ..
        } = &mut self.mode
        {
            let max_scroll = content.lines().count().saturating_sub(1);
            match event {
                InputEvent::MoveUp => *scroll = scroll.saturating_sub(1),
                InputEvent::MoveDown => *scroll = (*scroll + 1).min(max_scroll),
                InputEvent::PageUp => *scroll = scroll.saturating_sub(page),
                InputEvent::PageDown => *scroll = (*scroll + page).min(max_scroll),
                _ => {}
            }
        }
        Flow::Continue
    }

    fn on_search(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::Cancel => {
                self.filter = None;
                self.mode = Mode::Browse;
                self.selected = 0;
            }
            InputEvent::Confirm => self.apply_search(),
            InputEvent::Char(c) => {
                if let Mode::Search { query } = &mut self.mode {
                    query.push(c);
                }
            }
            InputEvent::Backspace => {
                if let Mode::Search { query } = &mut self.mode {
                    query.pop();
                }
            }
            _ => {}
        }
        Flow::Continue
    }

    fn commit_note(&mut self) {
        let text = match &self.mode {
            Mode::Compose { buffer } => buffer.clone(),
            _ => return,
        };
        let now = Local::now();
        match self.store.append(now.date_naive(), now.time(), &text) {
            Ok(()) => {
                self.mode = Mode::Browse;
                self.refresh_catalog();
            }
            // Buffer stays intact; the user's unsent text is not discarded.
            Err(err) => self.record_error(&err),
        }
    }

    fn open_selected(&mut self) {
        let Some(file) = self.visible().get(self.selected).cloned() else {
            return;
        };
        match self.store.read(&file.path) {
            Ok(content) => {
                self.mode = Mode::View {
                    title: file.title(),
                    content,
                    scroll: 0,
                };
            }
            Err(err) => self.record_error(&err),
        }
    }

    fn run_backup(&mut self) {
        let stamp = Local::now().format("%Y-%m-%d-%H%M%S");
        let destination = self.backups_dir.join(format!("backup-{stamp}.zip"));
        if let Err(err) = self.store.export(&destination) {
            self.record_error(&err);
        }
    }

    fn apply_search(&mut self) {
        let query = match &self.mode {
            Mode::Search { query } => query.clone(),
            _ => return,
        };
        if query.trim().is_empty() {
            self.filter = None;
        } else {
            let items = self.index.search(&self.store, &query);
            self.filter = Some(ActiveFilter { query, items });
        }
        self.mode = Mode::Browse;
        self.selected = 0;
    }

    fn refresh_catalog(&mut self) {
        if let Err(err) = self.index.reload(&self.store) {
            self.record_error(&err);
        }
        let query = self.filter.as_ref().map(|filter| filter.query.clone());
        if let Some(query) = query {
            let items = self.index.search(&self.store, &query);
            if let Some(filter) = &mut self.filter {
                filter.items = items;
            }
        }
        self.clamp_selection();
    }

    fn visible(&self) -> &[LogFile] {
        self.filter
            .as_ref()
            .map(|filter| filter.items.as_slice())
            .unwrap_or_else(|| self.index.entries())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let current = self.selected as isize;
        let moved = (current + delta).clamp(0, len as isize - 1);
        self.selected = moved as usize;
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        self.selected = if len == 0 {
            0
        } else {
            self.selected.min(len - 1)
        };
    }

    fn page_len(&self) -> usize {
        usize::from(self.height.saturating_sub(LIST_CHROME_ROWS)).max(1)
    }

    fn record_error(&mut self, err: &StoreError) {
        warn!("event=session_error module=session status=recorded error={err}");
        self.last_error = Some(err.to_string());
    }
}
