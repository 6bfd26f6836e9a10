//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. A snapshot
//! becomes a pixel-space [`Scene`], the scene is painted into a framebuffer,
//! and the framebuffer is flushed to the terminal.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Keep the drawing contract backend-neutral (the scene is in pixels)
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod scene;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
pub use scene::{Block, Caption, Scene};
