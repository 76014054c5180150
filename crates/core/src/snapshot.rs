use serde::{Deserialize, Serialize};

use crate::types::{Direction, PowerUp, Position, GRID_HEIGHT, GRID_WIDTH};

/// Read-only copy of a game, taken after a tick for rendering or streaming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Head first.
    pub snake: Vec<Position>,
    pub direction: Direction,
    pub food: Position,
    pub power_up: Option<PowerUp>,
    pub power_up_timer: u32,
    pub score: u32,
    pub game_over: bool,
    pub ticks: u64,
    pub episode_id: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = GRID_WIDTH;
        self.height = GRID_HEIGHT;
        self.snake.clear();
        self.direction = Direction::Right;
        self.food = Position::new(0, 0);
        self.power_up = None;
        self.power_up_timer = 0;
        self.score = 0;
        self.game_over = false;
        self.ticks = 0;
        self.episode_id = 0;
    }

}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: 0,
            height: 0,
            snake: Vec::new(),
            direction: Direction::Right,
            food: Position::new(0, 0),
            power_up: None,
            power_up_timer: 0,
            score: 0,
            game_over: false,
            ticks: 0,
            episode_id: 0,
        };
        s.clear();
        s
    }
}
