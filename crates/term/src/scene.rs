//! Scene: the draw list for one frame, in pixel coordinates.
//!
//! A scene is what a 2D surface needs to paint the game: one filled and
//! outlined square per occupied cell at `(col * cell_size, row * cell_size)`
//! and a score caption. It is built from a [`GameSnapshot`] and never looks
//! at the session itself. Backends (the terminal view here) consume it.

use crate::core::GameSnapshot;
use crate::types::{PieceColor, BOARD_COLS, BOARD_ROWS, MAX_CELL_SIZE_PX, SCORE_TEXT_ORIGIN_PX};

/// One square on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// Left edge in pixels
    pub x: u32,
    /// Top edge in pixels
    pub y: u32,
    /// Edge length in pixels
    pub size: u32,
    pub fill: PieceColor,
    /// Belongs to the falling piece rather than the locked stack
    pub active: bool,
}

impl Block {
    /// Board cell this block covers: (row, col)
    pub fn cell(&self) -> (u32, u32) {
        (self.y / self.size, self.x / self.size)
    }
}

/// Text drawn over the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub x: u32,
    pub y: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub cell_size: u32,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Locked cells first (top to bottom), then the active piece
    pub blocks: Vec<Block>,
    pub score: Caption,
    /// "Lines: N", for a status panel beside the surface
    pub lines_text: String,
    pub game_over: bool,
}

impl Scene {
    /// `cell_size` is clamped to `1..=MAX_CELL_SIZE_PX`.
    pub fn new(cell_size: u32) -> Self {
        let cell_size = cell_size.clamp(1, MAX_CELL_SIZE_PX);
        Self {
            cell_size,
            width: BOARD_COLS as u32 * cell_size,
            height: BOARD_ROWS as u32 * cell_size,
            blocks: Vec::with_capacity(BOARD_ROWS * BOARD_COLS + 16),
            score: Caption {
                x: SCORE_TEXT_ORIGIN_PX.0,
                y: SCORE_TEXT_ORIGIN_PX.1,
                text: String::with_capacity(24),
            },
            lines_text: String::with_capacity(24),
            game_over: false,
        }
    }

    /// Build a fresh scene from a snapshot.
    pub fn from_snapshot(snap: &GameSnapshot, cell_size: u32) -> Self {
        let mut scene = Self::new(cell_size);
        scene.rebuild(snap);
        scene
    }

    /// Rebuild in place, reusing the block and text buffers.
    pub fn rebuild(&mut self, snap: &GameSnapshot) {
        use std::fmt::Write as _;

        self.blocks.clear();
        let size = self.cell_size;

        for (row, cells) in snap.board.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if let Some(fill) = *cell {
                    self.blocks.push(Block {
                        x: col as u32 * size,
                        y: row as u32 * size,
                        size,
                        fill,
                        active: false,
                    });
                }
            }
        }

        if let Some(active) = &snap.active {
            for &(row, col) in active.cells.iter() {
                // Off-board cells (after an unchecked rotation) are clipped.
                if row < 0 || col < 0 || row as usize >= BOARD_ROWS || col as usize >= BOARD_COLS {
                    continue;
                }
                self.blocks.push(Block {
                    x: col as u32 * size,
                    y: row as u32 * size,
                    size,
                    fill: active.color,
                    active: true,
                });
            }
        }

        self.score.text.clear();
        let _ = write!(self.score.text, "Score: {}", snap.score);
        self.lines_text.clear();
        let _ = write!(self.lines_text, "Lines: {}", snap.lines);
        self.game_over = snap.game_over;
    }
}
