//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Each key
//! press is one command; there is no auto-repeat handling, so holding Down
//! drops the piece one row per event the terminal delivers.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
