//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Direction
//! requests are not buffered here: the game keeps only the latest accepted one.

pub mod map;

pub use tui_snake_types as types;

pub use map::{handle_key_event, should_quit};
