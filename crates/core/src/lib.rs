//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds all the game rules and state. It has no dependencies on
//! the terminal, input devices or the system clock: time is passed in by the
//! caller, and randomness comes from a seeded generator, so the same seed and
//! the same inputs always replay the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 20x10 grid of locked cells
//! - [`shapes`]: the seven shape matrices and clockwise rotation
//! - [`rng`]: seeded uniform choice of shape and color
//! - [`lines`]: completed-row detection and removal
//! - [`scoring`]: points per cleared row
//! - [`timer`]: fixed-interval gravity clock
//! - [`session`]: the game session (active piece, locking, top-out, lifecycle)
//! - [`snapshot`]: read-only state for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_types::{GameAction, Rules};
//!
//! let mut game = GameSession::new(12345, Rules::classic());
//! game.start();
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//!
//! // Two gravity ticks at the default 500 ms interval.
//! assert_eq!(game.advance(1000), 2);
//! assert!(!game.is_over());
//! ```

pub mod board;
pub mod lines;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod timer;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use lines::clear_completed_rows;
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::calculate_score;
pub use session::{is_topped_out, ActivePiece, GameSession, LockEvent, PiecePhase};
pub use shapes::{get_shape, Shape, ShapeCells};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use timer::TickTimer;
