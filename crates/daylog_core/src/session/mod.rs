//! Modal interaction session.
//!
//! # Responsibility
//! - Define the input-event vocabulary shared with the presentation layer.
//! - Drive the modal state machine that routes events to store and catalog.
//!
//! # Invariants
//! - Session state is mutated only through `Session::handle_event`.
//! - Every store/catalog failure is recorded and surfaced at least once;
//!   none is fatal to the session.

pub mod event;
pub mod state;
