//! Domain model for daily journal logs.
//!
//! # Responsibility
//! - Define the canonical per-day log file identity and its filename codec.
//! - Define note-entry validation and the committed line format.
//!
//! # Invariants
//! - A calendar date maps to exactly one log filename, and back.
//! - Committed entry lines are never reparsed or rewritten by the core.

pub mod entry;
pub mod log_file;
