//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It renders a [`GameSnapshot`](crate::core::GameSnapshot) into a simple
//! framebuffer that is then flushed to a terminal backend, plus a pixel
//! [`RasterView`] that draws screenshots as images.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Only redraw what changed between ticks
//! - Allow precise control over aspect ratio (e.g. 2 chars wide per cell)

pub mod fb;
pub mod game_view;
pub mod raster;
pub mod renderer;

pub use image;
pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Palette, Rgb};
pub use game_view::{GameView, Viewport};
pub use raster::RasterView;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
