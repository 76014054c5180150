//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It does no I/O and knows nothing about wall-clock time, making it:
//!
//! - **Deterministic**: Randomness is injected through [`RandomSource`]
//! - **Testable**: Tests can script exact spawn positions with [`ScriptedRng`]
//! - **Portable**: Drives the terminal front-end and the session server alike
//!
//! # Module Structure
//!
//! - [`game_state`]: The game itself: movement, collisions, food, power-ups, score
//! - [`rng`]: Injectable random sources
//! - [`snake`]: Snake body storage
//! - [`snapshot`]: Immutable view handed to renderers and observers
//!
//! # Game Rules
//!
//! - The snake starts as one cell in the middle of the grid, heading in a random direction
//! - Every tick the head advances one cell; leaving the grid or hitting the body ends the game
//! - Food grows the snake by one and scores 10
//! - Every 50 ticks without food and without an active power-up, a power-up spawns
//! - Collecting the ShedTail power-up drops one extra tail segment and scores 20
//!
//! # Example
//!
//! ```
//! use tui_snake_core::GameState;
//! use tui_snake_types::{Direction, GameAction};
//!
//! let mut game = GameState::with_seed(12345);
//! game.apply_action(GameAction::Turn(Direction::Up));
//! game.tick();
//!
//! let snap = game.snapshot();
//! assert_eq!(snap.ticks, 1);
//! assert!(!snap.game_over);
//! ```
//!
//! # Timing
//!
//! The driver is expected to call [`GameState::tick`](game_state::GameState::tick)
//! every `TICK_MS` (200ms) and [`GameState::change_direction`](game_state::GameState::change_direction)
//! whenever input arrives in between.

pub mod game_state;
pub mod rng;
pub mod snake;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use game_state::GameState;
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use snake::Snake;
pub use snapshot::GameSnapshot;
