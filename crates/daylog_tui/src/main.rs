//! Terminal frontend for daylog.
//!
//! # Responsibility
//! - Own terminal setup/teardown and the event loop.
//! - Map raw key events to the core's input vocabulary and render its view
//!   models.
//!
//! This crate holds no invariants of its own; everything that matters lives
//! in `daylog_core`.

mod ui;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use daylog_core::{
    default_log_level, init_logging, Config, Flow, FsNoteStore, InputEvent, Session, ViewModel,
};
use log::info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match Config::resolve() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {err}");
            return ExitCode::FAILURE;
        }
    };

    // The only fatal filesystem error: the store must have its directory
    // before the interaction loop starts.
    if let Err(err) = std::fs::create_dir_all(config.logs_dir()) {
        eprintln!(
            "Error creating directory {}: {err}",
            config.logs_dir().display()
        );
        return ExitCode::FAILURE;
    }

    if let Err(err) = init_logging(default_log_level(), &config.diagnostics_dir()) {
        // Diagnostics are best-effort; the journal stays usable without
        // them.
        eprintln!("Warning: logging disabled: {err}");
    }

    let session = Session::new(FsNoteStore::new(config.clone()), &config);
    match run(session) {
        Ok(()) => {
            info!("event=app_exit module=tui status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error running program: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(mut session: Session<FsNoteStore>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, &mut session);

    // Restore the terminal on every exit path before reporting errors.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    session: &mut Session<FsNoteStore>,
) -> io::Result<()> {
    let size = terminal.size()?;
    session.handle_event(InputEvent::Resize {
        width: size.width,
        height: size.height,
    });

    loop {
        terminal.draw(|frame| ui::render(frame, &session.view()))?;

        let Some(input) = next_input(session)? else {
            continue;
        };
        if session.handle_event(input) == Flow::Exit {
            return Ok(());
        }
    }
}

/// Reads one terminal event and maps it for the current state.
fn next_input(session: &Session<FsNoteStore>) -> io::Result<Option<InputEvent>> {
    let text_entry = matches!(
        session.view(),
        ViewModel::Compose { .. } | ViewModel::Search { .. }
    );

    let mapped = match event::read()? {
        Event::Resize(width, height) => Some(InputEvent::Resize { width, height }),
        Event::Key(key) if key.kind != KeyEventKind::Release => {
            if text_entry {
                map_text_entry_key(key.code, key.modifiers)
            } else {
                map_command_key(key.code, key.modifiers)
            }
        }
        _ => None,
    };
    Ok(mapped)
}

/// Key mapping while a text buffer is focused: printable keys are text.
fn map_text_entry_key(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Backspace => Some(InputEvent::Backspace),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputEvent::Char(c))
        }
        _ => None,
    }
}

/// Key mapping in Browse and View: vim-style movement plus command keys.
fn map_command_key(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('u') => Some(InputEvent::PageUp),
            KeyCode::Char('d') => Some(InputEvent::PageDown),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(InputEvent::Quit),
        KeyCode::Char('a') => Some(InputEvent::BeginCompose),
        KeyCode::Char('B') => Some(InputEvent::TriggerBackup),
        KeyCode::Char('/') => Some(InputEvent::BeginSearch),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Esc => Some(InputEvent::Cancel),
        KeyCode::Char('h') | KeyCode::Left => Some(InputEvent::Back),
        KeyCode::Char('k') | KeyCode::Up => Some(InputEvent::MoveUp),
        KeyCode::Char('j') | KeyCode::Down => Some(InputEvent::MoveDown),
        KeyCode::PageUp => Some(InputEvent::PageUp),
        KeyCode::PageDown => Some(InputEvent::PageDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{map_command_key, map_text_entry_key};
    use crossterm::event::{KeyCode, KeyModifiers};
    use daylog_core::InputEvent;

    #[test]
    fn command_keys_follow_the_browse_bindings() {
        assert_eq!(
            map_command_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(InputEvent::Quit)
        );
        assert_eq!(
            map_command_key(KeyCode::Char('a'), KeyModifiers::NONE),
            Some(InputEvent::BeginCompose)
        );
        assert_eq!(
            map_command_key(KeyCode::Char('B'), KeyModifiers::SHIFT),
            Some(InputEvent::TriggerBackup)
        );
        assert_eq!(
            map_command_key(KeyCode::Char('d'), KeyModifiers::CONTROL),
            Some(InputEvent::PageDown)
        );
    }

    #[test]
    fn text_entry_keeps_command_letters_as_text() {
        assert_eq!(
            map_text_entry_key(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(InputEvent::Char('q'))
        );
        assert_eq!(
            map_text_entry_key(KeyCode::Esc, KeyModifiers::NONE),
            Some(InputEvent::Cancel)
        );
        assert_eq!(
            map_text_entry_key(KeyCode::Char('c'), KeyModifiers::CONTROL),
            None
        );
    }
}
