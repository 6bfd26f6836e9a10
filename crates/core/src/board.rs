//! Board module - the grid of locked cells
//!
//! The board is a 20x10 grid where each cell is empty or holds a color.
//! Cells live in a flat row-major array so the dimensions can never change;
//! only cell contents mutate.
//! Coordinates are `(row, col)`: row 0 is the top, col 0 the left edge.
//! They are signed so callers can test candidate positions off the grid.

use crate::types::{Cell, PieceColor, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
const BOARD_SIZE: usize = BOARD_ROWS * BOARD_COLS;

/// The game board - 20 rows x 10 columns using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(row: i16, col: i16) -> Option<usize> {
        if Self::in_bounds(row, col) {
            Some(row as usize * BOARD_COLS + col as usize)
        } else {
            None
        }
    }

    #[inline(always)]
    fn in_bounds(row: i16, col: i16) -> bool {
        row >= 0 && (row as usize) < BOARD_ROWS && col >= 0 && (col as usize) < BOARD_COLS
    }

    pub fn rows(&self) -> usize {
        BOARD_ROWS
    }

    pub fn cols(&self) -> usize {
        BOARD_COLS
    }

    /// Check if `(row, col)` lies on the grid
    pub fn is_inside_bounds(&self, row: i16, col: i16) -> bool {
        Self::in_bounds(row, col)
    }

    /// Check if an on-grid cell holds a locked block.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is off the grid. Check [`Board::is_inside_bounds`]
    /// first, or use [`Board::is_free`] which does both.
    pub fn is_occupied(&self, row: i16, col: i16) -> bool {
        match Self::index(row, col) {
            Some(idx) => self.cells[idx].is_some(),
            None => panic!("is_occupied({row}, {col}) is outside the {BOARD_ROWS}x{BOARD_COLS} board"),
        }
    }

    /// Check if a piece cell may sit at `(row, col)`: on the grid and empty
    pub fn is_free(&self, row: i16, col: i16) -> bool {
        self.is_inside_bounds(row, col) && !self.is_occupied(row, col)
    }

    /// Get cell at `(row, col)`, `None` if off the grid
    pub fn get(&self, row: i16, col: i16) -> Option<Cell> {
        Self::index(row, col).map(|idx| self.cells[idx])
    }

    /// Paint a cell with a color.
    /// Returns false (and changes nothing) if `(row, col)` is off the grid.
    pub fn set_cell(&mut self, row: i16, col: i16, color: PieceColor) -> bool {
        self.set(row, col, Some(color))
    }

    /// Set cell contents, including back to empty.
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i16, col: i16, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * BOARD_COLS;
        &self.cells[start..start + BOARD_COLS]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= BOARD_ROWS {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Remove a row, shift every row above it down by one and put an empty
    /// row on top. Rows below `row` are untouched.
    /// Returns the number of rows removed (1 or 0)
    pub fn clear_row(&mut self, row: usize) -> usize {
        if row >= BOARD_ROWS {
            return 0;
        }

        // Everything in rows [0, row) moves down one row in a single overlapping copy.
        self.cells.copy_within(0..row * BOARD_COLS, BOARD_COLS);
        self.cells[..BOARD_COLS].fill(None);

        1
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a 2D array (for snapshots and rendering)
    pub fn write_grid(&self, out: &mut [[Cell; BOARD_COLS]; BOARD_ROWS]) {
        for (row, dst) in out.iter_mut().enumerate() {
            dst.copy_from_slice(self.row(row));
        }
    }

    /// Build a board from text rows, `.` for empty and any other char for a
    /// block of `color`. Missing rows are padded at the top, so the last
    /// line given is the bottom row.
    ///
    /// ```
    /// use blockfall_core::Board;
    /// use blockfall_types::PieceColor;
    ///
    /// let board = Board::from_rows(&["#########."], PieceColor::Red);
    /// assert!(board.is_occupied(19, 0));
    /// assert!(!board.is_occupied(19, 9));
    /// ```
    pub fn from_rows(rows: &[&str], color: PieceColor) -> Self {
        assert!(rows.len() <= BOARD_ROWS, "too many rows");
        let mut board = Self::new();
        let offset = BOARD_ROWS - rows.len();
        for (i, line) in rows.iter().enumerate() {
            assert_eq!(line.chars().count(), BOARD_COLS, "row {i} has the wrong width");
            for (col, ch) in line.chars().enumerate() {
                if ch != '.' {
                    board.set_cell((offset + i) as i16, col as i16, color);
                }
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
