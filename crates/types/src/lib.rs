//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are plain data with no external dependencies, so they can be used
//! by the game rules, the input mapping and the terminal renderer alike.
//!
//! # Board Dimensions
//!
//! - **Rows**: 20 (indexed 0-19, top to bottom)
//! - **Columns**: 10 (indexed 0-9, left to right)
//! - **Spawn position**: row 0, horizontally centered on the shape's width
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 500 | Gravity tick: the active piece falls one row |
//! | `FRAME_MS` | 16 | Render cadence of the driver loop (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceColor, PieceKind, Rules, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(BOARD_ROWS, 20);
//! assert_eq!(BOARD_COLS, 10);
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(PieceColor::Orange.rgb(), (0xFF, 0xA5, 0x00));
//! assert_eq!(Rules::default().tick_ms, 500);
//! ```

/// Board height in cells (20 rows)
pub const BOARD_ROWS: usize = 20;

/// Board width in cells (10 columns)
pub const BOARD_COLS: usize = 10;

/// Edge length of one board cell on a pixel surface
pub const CELL_SIZE_PX: u32 = 30;

/// Largest accepted cell edge on a pixel surface
pub const MAX_CELL_SIZE_PX: u32 = 128;

/// Gravity tick interval in milliseconds
pub const TICK_MS: u64 = 500;

/// Frame interval of the render loop in milliseconds
pub const FRAME_MS: u64 = 16;

/// Points awarded per cleared row
pub const POINTS_PER_ROW: u32 = 100;

/// Where the score text sits on a pixel surface (x, y)
pub const SCORE_TEXT_ORIGIN_PX: (u32, u32) = (10, 30);

/// The seven catalog shapes.
///
/// The kind only selects the shape matrix. Colors are drawn independently,
/// so any kind can show up in any [`PieceColor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// 1x4 bar
    I,
    /// `[[1,1,1],[0,1,0]]`
    T,
    /// `[[1,1,1],[1,0,0]]`
    L,
    /// `[[1,1,1],[0,0,1]]`
    J,
    /// `[[0,1,1],[1,1,0]]`
    S,
    /// 2x2 square
    O,
    /// `[[1,1,0],[0,1,1]]`
    Z,
}

impl PieceKind {
    /// Catalog order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::O,
        PieceKind::Z,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::T => 1,
            PieceKind::L => 2,
            PieceKind::J => 3,
            PieceKind::S => 4,
            PieceKind::O => 5,
            PieceKind::Z => 6,
        }
    }

    /// Short name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::O => "o",
            PieceKind::Z => "z",
        }
    }
}

/// Color of a locked cell or of the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Purple,
    Red,
}

impl PieceColor {
    /// Palette order
    pub const ALL: [PieceColor; 7] = [
        PieceColor::Cyan,
        PieceColor::Blue,
        PieceColor::Orange,
        PieceColor::Yellow,
        PieceColor::Green,
        PieceColor::Purple,
        PieceColor::Red,
    ];

    /// 24-bit RGB components
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceColor::Cyan => (0x00, 0xFF, 0xFF),
            PieceColor::Blue => (0x00, 0x00, 0xFF),
            PieceColor::Orange => (0xFF, 0xA5, 0x00),
            PieceColor::Yellow => (0xFF, 0xFF, 0x00),
            PieceColor::Green => (0x00, 0x80, 0x00),
            PieceColor::Purple => (0x80, 0x00, 0x80),
            PieceColor::Red => (0xFF, 0x00, 0x00),
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty
/// - `Some(color)`: occupied by a locked block of that color
pub type Cell = Option<PieceColor>;

/// Commands that drive a game session.
///
/// The first four are the in-game controls. `Restart` is a session control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one row down (locks it when blocked)
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Throw the current game away and start a fresh one
    Restart,
}

/// Whether rotation consults the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationPolicy {
    /// Apply the rotated matrix unconditionally, even if it overlaps locked
    /// cells or leaves the board.
    #[default]
    Unchecked,
    /// Keep the old matrix when the rotated one would collide.
    Checked,
}

impl RotationPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "unchecked" => Some(RotationPolicy::Unchecked),
            "checked" => Some(RotationPolicy::Checked),
            _ => None,
        }
    }
}

/// How a freshly spawned piece is judged to have topped out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TopOutRule {
    /// The new piece cannot move down and sits on row 0.
    #[default]
    BlockedAtSpawnRow,
    /// The new piece overlaps a locked cell (or leaves the board) where it spawned.
    SpawnOverlap,
}

impl TopOutRule {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "spawn-row" | "spawn_row" => Some(TopOutRule::BlockedAtSpawnRow),
            "overlap" | "spawn-overlap" => Some(TopOutRule::SpawnOverlap),
            _ => None,
        }
    }
}

/// Rule set a session plays by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    pub rotation: RotationPolicy,
    pub top_out: TopOutRule,
    /// Gravity tick interval in milliseconds
    pub tick_ms: u64,
}

impl Rules {
    pub fn new(rotation: RotationPolicy, top_out: TopOutRule, tick_ms: u64) -> Self {
        Self {
            rotation,
            top_out,
            tick_ms,
        }
    }

    /// Classic rules: unchecked rotation, spawn-row top-out, 500 ms ticks.
    pub fn classic() -> Self {
        Self::new(RotationPolicy::Unchecked, TopOutRule::BlockedAtSpawnRow, TICK_MS)
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}
