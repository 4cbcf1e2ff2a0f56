//! Terminal input mapping.
//!
//! Translates `crossterm` key events into [`crate::types::Command`]s. Key repeat
//! is left to the terminal: every press or auto-repeat becomes one command.

pub mod map;

pub use stackfall_types as types;

pub use map::{handle_key_event, should_quit};
