//! Read-only copy of the session state for renderers.

use crate::session::{ActivePiece, PiecePhase};
use crate::shapes::ShapeCells;
use crate::types::{Cell, PieceColor, PieceKind, BOARD_COLS, BOARD_ROWS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub row: i16,
    pub col: i16,
    /// Board coordinates `(row, col)` of every occupied cell. May include
    /// cells off the board after an unchecked rotation.
    pub cells: ShapeCells,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind,
            color: value.color,
            row: value.row,
            col: value.col,
            cells: value.cells(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_COLS]; BOARD_ROWS],
    pub active: Option<ActiveSnapshot>,
    pub phase: PiecePhase,
    pub score: u32,
    pub lines: u32,
    pub game_over: bool,
    /// Gravity timer running
    pub running: bool,
    pub episode_id: u32,
    pub seed: u32,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; BOARD_COLS]; BOARD_ROWS],
            active: None,
            phase: PiecePhase::Spawned,
            score: 0,
            lines: 0,
            game_over: false,
            running: false,
            episode_id: 0,
            seed: 0,
        }
    }
}
