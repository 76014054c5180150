//! Pixel raster of a game: the grid drawn with `cell_px`-sized squares.
//!
//! Matches the classic picture of the game: a white canvas, light gray lines
//! every `cell_px` pixels, then filled squares for the snake, the food and the
//! power-up, in that order. Squares span `cell_px + 1` pixels (both edges
//! included), so they cover the grid line on their right and bottom.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbImage;

use crate::core::GameSnapshot;
use crate::fb::{Palette, Rgb};
use crate::types::Position;

/// Renders snapshots into RGB images.
#[derive(Debug, Clone, Copy)]
pub struct RasterView {
    cell_px: u32,
    palette: Palette,
}

impl RasterView {
    pub fn new(cell_px: u16) -> Self {
        Self {
            cell_px: cell_px.max(1) as u32,
            palette: Palette::default(),
        }
    }

    pub fn render(&self, snap: &GameSnapshot) -> RgbImage {
        let c = self.cell_px;
        let w = snap.width as u32 * c;
        let h = snap.height as u32 * c;
        let mut img = RgbImage::from_pixel(w, h, pixel(self.palette.background));

        for x in (0..w).step_by(c as usize) {
            fill_rect(&mut img, x, 0, x, h, self.palette.grid);
        }
        for y in (0..h).step_by(c as usize) {
            fill_rect(&mut img, 0, y, w, y, self.palette.grid);
        }

        for &seg in &snap.snake {
            self.fill_cell(&mut img, seg, self.palette.snake);
        }
        self.fill_cell(&mut img, snap.food, self.palette.food);
        if let Some(power_up) = snap.power_up {
            self.fill_cell(&mut img, power_up.position, self.palette.power_up);
        }

        img
    }

    /// Render and save; the format follows the file extension (`.png`, `.ppm`, ...).
    pub fn save(&self, snap: &GameSnapshot, path: &Path) -> Result<()> {
        self.render(snap)
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))
    }

    fn fill_cell(&self, img: &mut RgbImage, pos: Position, color: Rgb) {
        if pos.x < 0 || pos.y < 0 {
            return;
        }
        let c = self.cell_px;
        let (x, y) = (pos.x as u32, pos.y as u32);
        fill_rect(img, x * c, y * c, (x + 1) * c, (y + 1) * c, color);
    }
}

impl Default for RasterView {
    fn default() -> Self {
        Self::new(crate::types::CELL_SIZE_PX)
    }
}

pub fn pixel(rgb: Rgb) -> image::Rgb<u8> {
    image::Rgb([rgb.r, rgb.g, rgb.b])
}

/// Fill the inclusive rectangle `[x0, x1] x [y0, y1]`, clipped to the image.
fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 || x0 >= w || y0 >= h {
        return;
    }
    let color = pixel(color);
    for y in y0..=y1.min(h - 1) {
        for x in x0..=x1.min(w - 1) {
            img.put_pixel(x, y, color);
        }
    }
}
