//! Line clearing - removes completed rows after a lock.

use crate::board::Board;
use crate::types::BOARD_ROWS;

/// Clear every complete row and return how many were removed.
///
/// Scans from the bottom row upwards. After a clear the rows above have
/// shifted down into the same index, so that index is examined again instead
/// of moving on; this way stacked complete rows are each counted exactly once.
pub fn clear_completed_rows(board: &mut Board) -> u32 {
    let mut cleared = 0;
    let mut row = BOARD_ROWS;

    while row > 0 {
        if board.is_row_full(row - 1) {
            board.clear_row(row - 1);
            cleared += 1;
        } else {
            row -= 1;
        }
    }

    cleared
}
