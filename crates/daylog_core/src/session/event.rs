//! Input events and loop control.
//!
//! # Responsibility
//! - Define the discrete input vocabulary the session consumes.
//!
//! # Invariants
//! - Events are presentation-agnostic: the session never sees raw key
//!   codes, only these meanings.

/// One discrete input event, already mapped from whatever the presentation
/// layer captures.
///
/// In text-entry states the presentation maps printable keys to
/// [`InputEvent::Char`] rather than to their command meanings (`q` in
/// Compose is text, not quit); [`super::state::ViewModel`] tells it which
/// mapping applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Leave the program. Valid in Browse and View.
    Quit,
    /// Start composing a new note.
    BeginCompose,
    /// Start entering a search query.
    BeginSearch,
    /// Export the log tree to a timestamped backup archive.
    TriggerBackup,
    /// Open the selection / commit the buffer, depending on state.
    Confirm,
    /// Abandon the current buffer or filter.
    Cancel,
    /// Return from View to Browse.
    Back,
    /// List or scroll movement.
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Text entry into the focused buffer.
    Char(char),
    Backspace,
    /// Terminal geometry change. Applies in every state.
    Resize { width: u16, height: u16 },
}

/// Whether the interaction loop should keep running after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}
