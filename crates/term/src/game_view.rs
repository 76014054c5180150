//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Palette, Rgb};
use crate::types::{Position, PowerUpKind};

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

const FILLED: char = '█';
const GRID_DOT: char = '·';
const PANEL_MIN_WIDTH: u16 = 14;

/// A lightweight terminal renderer for the snake grid.
pub struct GameView {
    /// Grid cell width in terminal columns.
    cell_w: u16,
    /// Grid cell height in terminal rows.
    cell_h: u16,
    palette: Palette,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares a cell on a typical terminal font.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            palette: Palette::default(),
        }
    }

    /// Size of the bordered grid in terminal cells.
    pub fn frame_size(&self, snap: &GameSnapshot) -> (u16, u16) {
        (
            snap.width as u16 * self.cell_w + 2,
            snap.height as u16 * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = self.palette.background;
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        self.draw_border(fb, origin_x, origin_y, frame_w, frame_h, border);

        let grid = CellStyle::new(self.palette.grid, bg);
        for y in 0..snap.height as i16 {
            for x in 0..snap.width as i16 {
                let (px, py) = self.cell_origin(origin_x, origin_y, Position::new(x, y));
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ' ', grid);
                fb.put_char(px, py, GRID_DOT, grid);
            }
        }

        let snake = CellStyle::new(self.palette.snake, bg);
        for (i, &seg) in snap.snake.iter().enumerate() {
            let style = if i == 0 { snake.bold() } else { snake };
            self.fill_cell(fb, origin_x, origin_y, seg, style);
        }

        self.fill_cell(fb, origin_x, origin_y, snap.food, CellStyle::new(self.palette.food, bg));

        if let Some(power_up) = snap.power_up {
            let style = CellStyle::new(self.palette.power_up, bg);
            self.fill_cell(fb, origin_x, origin_y, power_up.position, style);
        }

        self.draw_side_panel(fb, snap, viewport, origin_x.saturating_add(frame_w + 2), origin_y);

        if snap.game_over {
            let mid = origin_y + frame_h / 2;
            self.draw_centered(fb, origin_x, frame_w, mid, "GAME OVER");
            self.draw_centered(fb, origin_x, frame_w, mid + 1, "press R to restart");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn cell_origin(&self, origin_x: u16, origin_y: u16, pos: Position) -> (u16, u16) {
        (
            origin_x + 1 + pos.x as u16 * self.cell_w,
            origin_y + 1 + pos.y as u16 * self.cell_h,
        )
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, origin_x: u16, origin_y: u16, pos: Position, style: CellStyle) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let (px, py) = self.cell_origin(origin_x, origin_y, pos);
        fb.fill_rect(px, py, self.cell_w, self.cell_h, FILLED, style);
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

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        panel_x: u16,
        top: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_WIDTH {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = top;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "LENGTH", label);
        fb.put_u32(panel_x, y + 1, snap.snake.len() as u32, value);
        y += 3;

        fb.put_str(panel_x, y, "POWER-UP", label);
        let power_up = CellStyle::new(self.palette.power_up, Rgb::BLACK);
        match snap.power_up {
            Some(pu) => fb.put_str(panel_x, y + 1, power_up_label(pu.kind), power_up),
            None => fb.put_str(panel_x, y + 1, "-", value),
        }
        y += 3;

        let dim = CellStyle::new(Rgb::new(120, 120, 120), Rgb::BLACK);
        fb.put_str(panel_x, y, "arrows/wasd move", dim);
        fb.put_str(panel_x, y + 1, "r reset  q quit", dim);
    }

    fn draw_centered(&self, fb: &mut FrameBuffer, frame_x: u16, frame_w: u16, y: u16, text: &str) {
        let text_w = text.chars().count() as u16;
        let x = frame_x + frame_w.saturating_sub(text_w) / 2;
        let style = CellStyle::new(Rgb::WHITE, Rgb::new(200, 0, 0)).bold();
        fb.put_str(x, y, text, style);
    }
}

fn power_up_label(kind: PowerUpKind) -> &'static str {
    match kind {
        PowerUpKind::ShedTail => "shed tail",
    }
}
