//! Game session - the single owner of all mutable game state
//!
//! A session ties together the board, the falling piece, the score and the
//! gravity timer. Every mutation goes through it: gravity ticks, player input
//! and restarts. Renderers only read it, through [`GameSession::snapshot`].
//!
//! Piece lifecycle: `Spawned` -> `Falling` (after the first successful step
//! down) -> `Locking` (transient, while a blocked piece is merged and rows are
//! cleared) -> the next piece is `Spawned`.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::lines::clear_completed_rows;
use crate::rng::PieceRandomizer;
use crate::scoring::calculate_score;
use crate::shapes::{get_shape, Shape, ShapeCells};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::timer::TickTimer;
use crate::types::*;

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    /// Current (possibly rotated) matrix
    pub shape: Shape,
    pub color: PieceColor,
    /// Board row of the shape's top-left corner
    pub row: i16,
    /// Board column of the shape's top-left corner
    pub col: i16,
}

impl ActivePiece {
    /// A catalog piece at an explicit position
    pub fn new(kind: PieceKind, color: PieceColor, row: i16, col: i16) -> Self {
        Self {
            kind,
            shape: get_shape(kind),
            color,
            row,
            col,
        }
    }

    /// A catalog piece at the spawn position: row 0, centered by rounding
    /// both the board width and the shape width down.
    pub fn spawn(kind: PieceKind, color: PieceColor) -> Self {
        let shape = get_shape(kind);
        let col = (BOARD_COLS / 2) as i16 - (shape.cols() / 2) as i16;
        Self {
            kind,
            shape,
            color,
            row: 0,
            col,
        }
    }

    /// Board coordinates of every occupied cell
    pub fn cells(&self) -> ShapeCells {
        self.shape
            .cells()
            .into_iter()
            .map(|(dr, dc)| (self.row + dr, self.col + dc))
            .collect()
    }

    /// Would `shape` fit with its corner at `(row, col)`?
    fn shape_fits(board: &Board, shape: &Shape, row: i16, col: i16) -> bool {
        shape
            .cells()
            .iter()
            .all(|&(dr, dc)| board.is_free(row + dr, col + dc))
    }

    /// Would this piece fit after moving by `(d_row, d_col)`?
    pub fn fits_offset(&self, board: &Board, d_row: i16, d_col: i16) -> bool {
        Self::shape_fits(board, &self.shape, self.row + d_row, self.col + d_col)
    }

    /// Does this piece fit where it is?
    pub fn fits(&self, board: &Board) -> bool {
        self.fits_offset(board, 0, 0)
    }
}

/// Where the active piece is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PiecePhase {
    /// Just placed at the spawn position, not moved down yet
    Spawned,
    /// Has moved down at least once
    Falling,
    /// Being merged into the board
    Locking,
}

/// What happened when the last piece locked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub rows_cleared: u32,
    pub score_gained: u32,
    /// Piece cells that were off the board at lock time and got discarded
    pub cells_dropped: u32,
    /// The follow-up spawn topped out
    pub game_over: bool,
}

/// Top-out check for a freshly spawned piece.
///
/// [`TopOutRule::BlockedAtSpawnRow`] only asks whether the piece is stuck on
/// row 0; it can miss a spawn that overlaps locked cells but still has room
/// below. [`TopOutRule::SpawnOverlap`] checks the spawn cells themselves.
pub fn is_topped_out(board: &Board, piece: &ActivePiece, rule: TopOutRule) -> bool {
    match rule {
        TopOutRule::BlockedAtSpawnRow => !piece.fits_offset(board, 1, 0) && piece.row == 0,
        TopOutRule::SpawnOverlap => !piece.fits(board),
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameSession {
    board: Board,
    active: ActivePiece,
    phase: PiecePhase,
    randomizer: PieceRandomizer,
    rules: Rules,
    timer: TickTimer,
    score: u32,
    lines: u32,
    game_over: bool,
    /// Monotonic episode id (increments on restart)
    episode_id: u32,
    /// Pieces spawned this episode, the first one included
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
}

impl GameSession {
    /// Create a new game on an empty board with its first piece spawned.
    /// The gravity timer stays stopped until [`GameSession::start`].
    pub fn new(seed: u32, rules: Rules) -> Self {
        let mut randomizer = PieceRandomizer::new(seed);
        let (kind, color) = randomizer.draw();
        let active = ActivePiece::spawn(kind, color);
        trace!(?kind, ?color, col = active.col, "spawned first piece");
        Self::from_parts(Board::new(), active, randomizer, rules)
    }

    /// Create a game from a prepared board and active piece.
    /// Later pieces are drawn from `seed`.
    pub fn with_board(board: Board, active: ActivePiece, seed: u32, rules: Rules) -> Self {
        Self::from_parts(board, active, PieceRandomizer::new(seed), rules)
    }

    fn from_parts(
        board: Board,
        active: ActivePiece,
        randomizer: PieceRandomizer,
        rules: Rules,
    ) -> Self {
        Self {
            board,
            active,
            phase: PiecePhase::Spawned,
            randomizer,
            rules,
            timer: TickTimer::new(rules.tick_ms),
            score: 0,
            lines: 0,
            game_over: false,
            episode_id: 0,
            pieces_spawned: 1,
            last_event: None,
        }
    }

    /// Start the gravity timer. No effect once the game is over.
    pub fn start(&mut self) {
        if self.game_over || self.timer.is_running() {
            return;
        }
        self.timer.start();
        debug!(interval_ms = self.timer.interval_ms(), "tick timer started");
    }

    /// Stop the gravity timer. Input still works; rendering is the caller's business.
    pub fn stop(&mut self) {
        if self.timer.is_running() {
            self.timer.stop();
            debug!("tick timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    pub fn phase(&self) -> PiecePhase {
        self.phase
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Feed elapsed wall time to the gravity timer and run every tick that fell due.
    /// Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: u64) -> u64 {
        let due = self.timer.advance(elapsed_ms);
        let mut ran = 0;
        for _ in 0..due {
            if self.game_over {
                break;
            }
            self.tick();
            ran += 1;
        }
        ran
    }

    /// One gravity step: the piece falls a row or locks.
    /// Returns true if the piece moved.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        self.move_down()
    }

    /// Apply a player command.
    ///
    /// Once the game is over only [`GameAction::Restart`] does anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Restart {
            return false;
        }
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.move_down(),
            GameAction::Rotate => self.rotate(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Try to shift the active piece.
    ///
    /// All-or-nothing: the piece moves only if every occupied cell lands on
    /// the board and on an empty cell. Otherwise nothing changes.
    pub fn attempt_move(&mut self, d_row: i16, d_col: i16) -> bool {
        if self.game_over || !self.active.fits_offset(&self.board, d_row, d_col) {
            return false;
        }
        self.active.row += d_row;
        self.active.col += d_col;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.attempt_move(0, -1)
    }

    pub fn move_right(&mut self) -> bool {
        self.attempt_move(0, 1)
    }

    /// Move down one row, or lock the piece if it is blocked.
    /// Returns true if the piece moved.
    pub fn move_down(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        if self.attempt_move(1, 0) {
            self.phase = PiecePhase::Falling;
            return true;
        }
        self.lock_piece();
        false
    }

    /// Rotate the active piece 90° clockwise about its top-left corner.
    ///
    /// Under [`RotationPolicy::Unchecked`] the new matrix is applied without
    /// looking at the board. Under [`RotationPolicy::Checked`] it is rejected
    /// when it would collide.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = self.active.shape.rotated_cw();
        if self.rules.rotation == RotationPolicy::Checked
            && !ActivePiece::shape_fits(&self.board, &rotated, self.active.row, self.active.col)
        {
            return false;
        }
        self.active.shape = rotated;
        true
    }

    /// Merge the active piece into the board, clear rows, score them, spawn
    /// the next piece and check for top-out.
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        self.phase = PiecePhase::Locking;

        let locked = self.active;
        let mut cells_dropped = 0;
        for (row, col) in locked.cells() {
            // Cells left off the board by an unchecked rotation have nowhere to go.
            if !self.board.set_cell(row, col, locked.color) {
                cells_dropped += 1;
            }
        }
        debug!(
            kind = locked.kind.as_str(),
            row = locked.row,
            col = locked.col,
            cells_dropped,
            "piece locked"
        );

        let rows_cleared = clear_completed_rows(&mut self.board);
        let score_gained = calculate_score(rows_cleared);
        if rows_cleared > 0 {
            self.score = self.score.saturating_add(score_gained);
            self.lines = self.lines.saturating_add(rows_cleared);
            info!(rows_cleared, score = self.score, "rows cleared");
        }

        self.spawn_piece();

        let game_over = is_topped_out(&self.board, &self.active, self.rules.top_out);
        if game_over {
            self.game_over = true;
            self.timer.stop();
            info!(score = self.score, lines = self.lines, "game over");
        }

        self.last_event = Some(LockEvent {
            kind: locked.kind,
            color: locked.color,
            rows_cleared,
            score_gained,
            cells_dropped,
            game_over,
        });
    }

    /// Replace the active piece with a fresh random one at the spawn position
    fn spawn_piece(&mut self) {
        let (kind, color) = self.randomizer.draw();
        self.active = ActivePiece::spawn(kind, color);
        self.phase = PiecePhase::Spawned;
        self.pieces_spawned += 1;
        trace!(?kind, ?color, col = self.active.col, "spawned piece");
    }

    /// Throw the current game away: empty board, zero score, new piece.
    /// The gravity timer is (re)started.
    pub fn restart(&mut self) {
        let seed = self.randomizer.state();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::new(seed, self.rules);
        self.episode_id = next_episode;
        self.start();
        info!(episode = next_episode, seed, "game restarted");
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_grid(&mut out.board);
        out.active = Some(ActiveSnapshot::from(&self.active));
        out.phase = self.phase;
        out.score = self.score;
        out.lines = self.lines;
        out.game_over = self.game_over;
        out.running = self.timer.is_running();
        out.episode_id = self.episode_id;
        out.seed = self.randomizer.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    #[cfg(test)]
    fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(1, Rules::classic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(board: Board, piece: ActivePiece) -> GameSession {
        GameSession::with_board(board, piece, 12345, Rules::classic())
    }

    fn horizontal_i(row: i16, col: i16) -> ActivePiece {
        ActivePiece::new(PieceKind::I, PieceColor::Cyan, row, col)
    }

    fn vertical_i(row: i16, col: i16) -> ActivePiece {
        let mut p = ActivePiece::new(PieceKind::I, PieceColor::Cyan, row, col);
        p.shape = p.shape.rotated_cw();
        p
    }

    #[test]
    fn test_new_session() {
        let s = GameSession::new(12345, Rules::classic());
        assert_eq!(s.score, 0);
        assert_eq!(s.lines, 0);
        assert!(!s.game_over);
        assert!(!s.timer.is_running());
        assert_eq!(s.phase, PiecePhase::Spawned);
        assert_eq!(s.active.row, 0);
        assert_eq!(s.board.occupied_count(), 0);
    }

    #[test]
    fn test_spawn_centering() {
        assert_eq!(ActivePiece::spawn(PieceKind::T, PieceColor::Red).col, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::I, PieceColor::Red).col, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::O, PieceColor::Red).col, 4);
    }

    #[test]
    fn test_horizontal_bar_falls_nineteen_rows_then_locks() {
        let mut s = session_with(Board::new(), horizontal_i(0, 3));

        for step in 1..=19 {
            assert!(s.move_down(), "step {} should move", step);
            assert_eq!(s.active.row, step);
        }
        assert_eq!(s.phase, PiecePhase::Falling);

        assert!(!s.move_down());
        for col in 3..7 {
            assert_eq!(s.board.get(19, col), Some(Some(PieceColor::Cyan)));
        }
        assert_eq!(s.board.occupied_count(), 4);
        assert_eq!(s.phase, PiecePhase::Spawned);
        assert_eq!(s.active.row, 0);
        assert_eq!(s.pieces_spawned, 2);

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 0);
        assert!(!ev.game_over);
    }

    #[test]
    fn test_attempt_move_is_atomic() {
        let mut board = Board::new();
        // Block only the cell the rightmost mino would enter.
        board.set_cell(0, 7, PieceColor::Red);
        let mut s = session_with(board, horizontal_i(0, 3));

        assert!(!s.attempt_move(0, 1));
        assert_eq!((s.active.row, s.active.col), (0, 3));

        let mut s = session_with(Board::new(), horizontal_i(5, 0));
        assert!(!s.move_left());
        assert_eq!((s.active.row, s.active.col), (5, 0));
        assert!(s.move_right());
        assert_eq!(s.active.col, 1);
    }

    #[test]
    fn test_single_row_clear_scores_100() {
        let board = Board::from_rows(&["#########."], PieceColor::Blue);
        let mut s = session_with(board, vertical_i(0, 9));

        while s.move_down() {}

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 1);
        assert_eq!(s.score, 100);
        assert_eq!(s.lines, 1);
        // The three upper bar cells dropped one row.
        for row in 17..20 {
            assert!(s.board.is_occupied(row, 9));
        }
        assert_eq!(s.board.occupied_count(), 3);
    }

    #[test]
    fn test_double_row_clear_scores_200() {
        let board = Board::from_rows(&["#########.", "#########."], PieceColor::Blue);
        let mut s = session_with(board, vertical_i(0, 9));

        while s.move_down() {}

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.rows_cleared, 2);
        assert_eq!(ev.score_gained, 200);
        assert_eq!(s.score, 200);
    }

    #[test]
    fn test_unchecked_rotation_ignores_board() {
        let mut board = Board::new();
        board.set_cell(1, 4, PieceColor::Red);
        let mut s = session_with(board, ActivePiece::new(PieceKind::T, PieceColor::Green, 0, 4));

        assert!(s.rotate());
        assert_eq!(s.active.shape.to_matrix(), vec![vec![0, 1], vec![1, 1], vec![0, 1]]);
        // Overlaps the locked cell at (1, 4).
        assert!(s.active.cells().contains(&(1, 4)));
    }

    #[test]
    fn test_checked_rotation_rejects_collision() {
        let rules = Rules::new(RotationPolicy::Checked, TopOutRule::BlockedAtSpawnRow, TICK_MS);
        let mut s = GameSession::with_board(Board::new(), horizontal_i(18, 0), 1, rules);

        let before = s.active;
        assert!(!s.rotate());
        assert_eq!(s.active, before);

        assert!(s.attempt_move(-10, 0));
        assert!(s.rotate());
        assert_eq!((s.active.shape.rows(), s.active.shape.cols()), (4, 1));
    }

    #[test]
    fn test_lock_drops_cells_off_the_board() {
        let mut s = session_with(Board::new(), horizontal_i(18, 0));
        // Vertical bar from row 18 reaches rows 20 and 21.
        assert!(s.rotate());
        assert!(!s.move_down());

        let ev = s.take_last_event().unwrap();
        assert_eq!(ev.cells_dropped, 2);
        assert!(s.board.is_occupied(18, 0));
        assert!(s.board.is_occupied(19, 0));
        assert_eq!(s.board.occupied_count(), 2);
    }

    #[test]
    fn test_game_over_freezes_session() {
        // Rows 1..19 filled except the last column: nothing clears, nothing falls.
        let mut rows = vec!["#########."; BOARD_ROWS - 1];
        rows.insert(0, "..........");
        let board = Board::from_rows(&rows, PieceColor::Purple);
        let mut s = session_with(board, horizontal_i(0, 0));
        s.start();

        assert!(!s.move_down());
        assert!(s.is_over());
        assert!(!s.is_running());
        assert!(s.take_last_event().unwrap().game_over);

        let frozen_board = s.board.clone();
        let frozen_piece = s.active;
        assert!(!s.apply_action(GameAction::MoveLeft));
        assert!(!s.apply_action(GameAction::Rotate));
        assert!(!s.tick());
        assert_eq!(s.advance(5_000), 0);
        assert_eq!(s.board, frozen_board);
        assert_eq!(s.active, frozen_piece);
    }

    #[test]
    fn test_top_out_rules_differ() {
        // Row 1 blocked under the spawn, row 0 free.
        let mut board = Board::new();
        for col in 0..9 {
            board.set_cell(1, col, PieceColor::Red);
        }
        let piece = ActivePiece::spawn(PieceKind::T, PieceColor::Blue);
        assert!(is_topped_out(&board, &piece, TopOutRule::BlockedAtSpawnRow));
        assert!(!is_topped_out(&board, &piece, TopOutRule::SpawnOverlap));

        // Spawn cell overlapped, but room to fall below it.
        let mut board = Board::new();
        board.set_cell(0, 4, PieceColor::Red);
        assert!(!is_topped_out(&board, &piece, TopOutRule::BlockedAtSpawnRow));
        assert!(is_topped_out(&board, &piece, TopOutRule::SpawnOverlap));
    }

    #[test]
    fn test_advance_runs_due_ticks() {
        let mut s = session_with(Board::new(), horizontal_i(0, 3));
        assert_eq!(s.advance(500), 0, "timer not started");

        s.start();
        assert_eq!(s.advance(499), 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.active.row, 1);
        assert_eq!(s.advance(1000), 2);
        assert_eq!(s.active.row, 3);

        s.stop();
        assert_eq!(s.advance(1000), 0);
        assert_eq!(s.active.row, 3);
        // Input still works while stopped.
        assert!(s.apply_action(GameAction::SoftDrop));
        assert_eq!(s.active.row, 4);
    }

    #[test]
    fn test_restart_resets_game() {
        let board = Board::from_rows(&["#########."], PieceColor::Blue);
        let mut s = session_with(board, vertical_i(0, 9));
        while s.move_down() {}
        assert_eq!(s.score, 100);

        assert!(s.apply_action(GameAction::Restart));
        assert_eq!(s.score, 0);
        assert_eq!(s.lines, 0);
        assert_eq!(s.episode_id, 1);
        assert_eq!(s.board.occupied_count(), 0);
        assert!(s.is_running());
        assert!(!s.is_over());
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut s = GameSession::new(3, Rules::classic());
        s.board_mut().set_cell(1, 0, PieceColor::Red);
        s.game_over = true;
        assert!(s.apply_action(GameAction::Restart));
        assert!(!s.is_over());
        assert_eq!(s.board.occupied_count(), 0);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut s = session_with(Board::from_rows(&["#........."], PieceColor::Red), horizontal_i(2, 3));
        s.start();
        let snap = s.snapshot();
        assert_eq!(snap.board[19][0], Some(PieceColor::Red));
        let active = snap.active.unwrap();
        assert_eq!(active.cells.as_slice(), &[(2, 3), (2, 4), (2, 5), (2, 6)]);
        assert!(snap.running);
        assert!(!snap.game_over);
    }

    #[test]
    fn test_score_and_lines_saturate() {
        let board = Board::from_rows(&["#########."], PieceColor::Green);
        let mut piece = ActivePiece::new(PieceKind::I, PieceColor::Cyan, 16, 9);
        piece.shape = piece.shape.rotated_cw();
        let mut s = session_with(board, piece);
        s.score = u32::MAX - 50;
        s.lines = u32::MAX;

        assert!(!s.move_down());
        assert_eq!(s.score(), u32::MAX);
        assert_eq!(s.lines(), u32::MAX);
        assert_eq!(s.take_last_event().unwrap().rows_cleared, 1);
    }
}
