//! Browsable catalog over the note store.
//!
//! # Responsibility
//! - Maintain the in-memory, newest-first view of known log files.
//! - Provide the linear substring search over their content.
//!
//! # Invariants
//! - The catalog is derived state: rebuilt wholesale on reload, never
//!   persisted.
//! - Ordering is an explicit sort by date descending, independent of
//!   directory-listing order.

pub mod index;
