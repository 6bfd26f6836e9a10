//! Terminal falling-block game (workspace facade crate).
//!
//! Game rules live in `blockfall-core`, terminal drawing in `blockfall-term`
//! and key mapping in `blockfall-input`. This package re-exports them as
//! `tui_blockfall::{core,input,term,types}` and adds the runtime
//! configuration and logging used by the binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod logging;
