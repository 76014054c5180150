//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data, usable by the simulation, the terminal view
//! and the session server alike.
//!
//! # Grid
//!
//! The playfield is a `GRID_WIDTH` x `GRID_HEIGHT` grid of cells addressed by
//! [`Position`], with `(0, 0)` in the top-left corner and `y` growing downwards.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GRID_WIDTH` | 30 | Columns |
//! | `GRID_HEIGHT` | 30 | Rows |
//! | `CELL_SIZE_PX` | 20 | Raster pixels per cell |
//! | `TICK_MS` | 200 | Fixed tick interval |
//! | `FOOD_SCORE` | 10 | Points per food |
//! | `POWER_UP_SCORE` | 20 | Points per power-up |
//! | `POWER_UP_SPAWN_TICKS` | 50 | Ticks before a power-up appears |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, GameAction, Position};
//!
//! let head = Position::new(4, 4);
//! assert_eq!(head.step(Direction::Up), Position::new(4, 3));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//!
//! let action = GameAction::from_str("reset").unwrap();
//! assert_eq!(action, GameAction::Reset);
//! ```

use serde::{Deserialize, Serialize};

/// Grid width in cells
pub const GRID_WIDTH: u8 = 30;

/// Grid height in cells
pub const GRID_HEIGHT: u8 = 30;

/// Size of one grid cell in raster pixels
pub const CELL_SIZE_PX: u16 = 20;

/// Fixed tick interval in milliseconds
pub const TICK_MS: u32 = 200;

/// Score awarded for eating food
pub const FOOD_SCORE: u32 = 10;

/// Score awarded for collecting a power-up
pub const POWER_UP_SCORE: u32 = 20;

/// Ticks without a power-up before one spawns
pub const POWER_UP_SPAWN_TICKS: u32 = 50;

/// A cell on the grid.
///
/// Coordinates are signed so that a head stepping off the grid (`x = -1`)
/// is representable and can be detected as a wall collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i16,
    pub y: i16,
}

impl Position {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether this cell lies inside a `width` x `height` grid.
    pub fn in_bounds(self, width: u8, height: u8) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width as i16 && self.y < height as i16
    }
}

/// Movement direction of the snake
///
/// Each direction is a unit vector with `y` pointing down:
/// - **Up**: (0, -1)
/// - **Down**: (0, 1)
/// - **Left**: (-1, 0)
/// - **Right**: (1, 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in a fixed order used for random selection.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Component-wise negation of this direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.opposite(), Direction::Down);
    /// assert_eq!(Direction::Right.opposite(), Direction::Left);
    /// ```
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse direction from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Kinds of collectible power-up.
///
/// - **ShedTail**: drops one extra tail segment (never below length 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    ShedTail,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 1] = [PowerUpKind::ShedTail];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shed_tail" | "shedtail" => Some(PowerUpKind::ShedTail),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::ShedTail => "shed_tail",
        }
    }
}

/// A power-up lying on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerUp {
    pub position: Position,
    pub kind: PowerUpKind,
}

/// Player actions that can be applied to the game state
///
/// These come from the keyboard in the terminal front-end and from
/// `command` messages in the session server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Request a new heading (ignored when it reverses the snake)
    Turn(Direction),
    /// Start over with a fresh game
    Reset,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::{Direction, GameAction};
    ///
    /// assert_eq!(GameAction::from_str("up"), Some(GameAction::Turn(Direction::Up)));
    /// assert_eq!(GameAction::from_str("RESET"), Some(GameAction::Reset));
    /// assert_eq!(GameAction::from_str("jump"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("reset") {
            return Some(GameAction::Reset);
        }
        Direction::from_str(s).map(GameAction::Turn)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Turn(dir) => dir.as_str(),
            GameAction::Reset => "reset",
        }
    }
}

/// Rules of a game: grid size, scoring and power-up cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    pub food_score: u32,
    pub power_up_score: u32,
    pub power_up_spawn_ticks: u32,
    /// Kinds a spawned power-up is drawn from. Empty disables power-ups.
    pub power_up_kinds: Vec<PowerUpKind>,
}

impl GameConfig {
    /// Center cell, where a fresh snake starts.
    pub fn center(&self) -> Position {
        Position::new(self.width as i16 / 2, self.height as i16 / 2)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: GRID_WIDTH,
            height: GRID_HEIGHT,
            food_score: FOOD_SCORE,
            power_up_score: POWER_UP_SCORE,
            power_up_spawn_ticks: POWER_UP_SPAWN_TICKS,
            power_up_kinds: PowerUpKind::ALL.to_vec(),
        }
    }
}
