//! GameView: maps a game snapshot into a terminal framebuffer.
//!
//! The snapshot is first turned into a pixel-space [`Scene`]; scene pixel
//! coordinates are then scaled onto the terminal cell grid, so one board cell
//! of `scene.cell_size` pixels covers `cell_w x cell_h` characters. Text placed
//! in pixels (the score caption) moves with the cell size. This module is pure
//! (no I/O).

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::scene::{Block, Scene};
use crate::types::{BOARD_COLS, BOARD_ROWS, CELL_SIZE_PX, MAX_CELL_SIZE_PX};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const OUTLINE: Rgb = Rgb::new(20, 20, 20);
const PANEL_MIN_WIDTH: u16 = 14;

const CONTROLS: [&str; 5] = ["←/→  move", "↓    drop", "↑    rotate", "r    restart", "q    quit"];

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    /// Cell edge of the scene built by [`GameView::render_into`].
    cell_px: u32,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            cell_px: CELL_SIZE_PX,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_cell_size_px(mut self, cell_px: u32) -> Self {
        self.cell_px = cell_px.clamp(1, MAX_CELL_SIZE_PX);
        self
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Builds a fresh [`Scene`] each call. A frame loop should keep one scene,
    /// [`Scene::rebuild`] it and call [`GameView::render_scene_into`] instead.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        let scene = Scene::from_snapshot(snap, self.cell_px);
        self.render_scene_into(&scene, viewport, fb);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Paint a prepared scene. Every frame is drawn from scratch.
    pub fn render_scene_into(&self, scene: &Scene, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let board_w = BOARD_COLS as u16 * self.cell_w;
        let board_h = BOARD_ROWS as u16 * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };

        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for row in 0..BOARD_ROWS as u16 {
            for col in 0..BOARD_COLS as u16 {
                self.fill_cell_rect(fb, start_x, start_y, row, col, '·', empty);
            }
        }

        for block in &scene.blocks {
            self.draw_block(fb, start_x, start_y, block);
        }

        self.draw_side_panel(fb, scene, viewport, start_x, start_y, frame_w);

        let (cx, cy) = self.scene_to_term(scene, scene.score.x, scene.score.y);
        let caption = CellStyle::new(Rgb::new(255, 255, 255), BOARD_BG).bold();
        fb.put_str(
            start_x.saturating_add(1).saturating_add(cx),
            start_y.saturating_add(1).saturating_add(cy),
            &scene.score.text,
            caption,
        );

        if scene.game_over {
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER", 0);
            self.draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "r: restart", 2);
        }
    }

    /// Scale a scene pixel position to a character offset inside the frame.
    fn scene_to_term(&self, scene: &Scene, x: u32, y: u32) -> (u16, u16) {
        let size = u64::from(scene.cell_size.max(1));
        let tx = u64::from(x) * u64::from(self.cell_w) / size;
        let ty = u64::from(y) * u64::from(self.cell_h) / size;
        (
            tx.min(u64::from(u16::MAX)) as u16,
            ty.min(u64::from(u16::MAX)) as u16,
        )
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Filled square with an outline: `[]` on the fill color when the cell is
    /// at least two columns wide, a solid glyph otherwise.
    fn draw_block(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, block: &Block) {
        let (row, col) = block.cell();
        if row as usize >= BOARD_ROWS || col as usize >= BOARD_COLS {
            return;
        }
        let (row, col) = (row as u16, col as u16);
        let fill = Rgb::from(block.fill);

        if self.cell_w < 2 {
            let mut style = CellStyle::new(fill, BOARD_BG);
            style.bold = block.active;
            self.fill_cell_rect(fb, start_x, start_y, row, col, '█', style);
            return;
        }

        let mut style = CellStyle::new(OUTLINE, fill);
        style.bold = block.active;
        self.fill_cell_rect(fb, start_x, start_y, row, col, ' ', style);

        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        for dy in 0..self.cell_h {
            fb.put_char(px, py + dy, '[', style);
            fb.put_char(px + self.cell_w - 1, py + dy, ']', style);
        }
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = start_x + 1 + col * self.cell_w;
        let py = start_y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Lines count and key hints beside the board, when there is room.
    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        scene: &Scene,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::default().bold();
        let hint = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)).dim();

        let mut y = start_y;
        fb.put_str(panel_x, y, &scene.lines_text, label);
        y = y.saturating_add(2);

        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        text: &str,
        line: u16,
    ) {
        let y = start_y.saturating_add(frame_h / 2).saturating_add(line);
        let text_w = text.chars().count() as u16;
        let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}
