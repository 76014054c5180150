//! Game state module - owns one game and advances it tick by tick
//!
//! All mutation goes through [`GameState::change_direction`],
//! [`GameState::tick`] and [`GameState::reset`]. Once the snake hits a wall or
//! itself the state is frozen until `reset`.

use log::debug;

use crate::rng::{RandomSource, SimpleRng};
use crate::snake::Snake;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Random probes per grid cell before falling back to a full scan.
const SAMPLE_ATTEMPTS_PER_CELL: usize = 4;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng> {
    config: GameConfig,
    rng: R,
    snake: Snake,
    direction: Direction,
    food: Position,
    power_up: Option<PowerUp>,
    /// Ticks since the last power-up spawn or food.
    power_up_timer: u32,
    score: u32,
    game_over: bool,
    /// Ticks that moved the snake in this episode.
    ticks: u64,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
}

impl GameState<SimpleRng> {
    /// Default rules with a seeded LCG.
    pub fn with_seed(seed: u32) -> Self {
        Self::new(GameConfig::default(), SimpleRng::new(seed))
    }
}

impl Default for GameState<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

impl<R: RandomSource> GameState<R> {
    /// Start a game: one-cell snake at the center, random heading, random food.
    pub fn new(config: GameConfig, rng: R) -> Self {
        let center = config.center();
        let mut state = Self {
            snake: Snake::new(center),
            direction: Direction::Right,
            food: center,
            power_up: None,
            power_up_timer: 0,
            score: 0,
            game_over: false,
            ticks: 0,
            episode_id: 0,
            config,
            rng,
        };
        state.restart();
        state
    }

    /// Rebuild a live game from a snapshot.
    ///
    /// Grid size and scoring come from `config`; the snapshot's own `width` and
    /// `height` are ignored. The caller must pass a snapshot whose food and
    /// power-up do not overlap the snake. Returns `None` for an empty snake.
    pub fn from_snapshot(config: GameConfig, snap: &GameSnapshot, rng: R) -> Option<Self> {
        let snake = Snake::from_segments(snap.snake.iter().copied())?;
        Some(Self {
            config,
            rng,
            snake,
            direction: snap.direction,
            food: snap.food,
            power_up: snap.power_up,
            power_up_timer: snap.power_up_timer,
            score: snap.score,
            game_over: snap.game_over,
            ticks: snap.ticks,
            episode_id: snap.episode_id,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn power_up(&self) -> Option<PowerUp> {
        self.power_up
    }

    pub fn power_up_timer(&self) -> u32 {
        self.power_up_timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.config.width;
        out.height = self.config.height;
        out.snake.clear();
        out.snake.extend(self.snake.segments());
        out.direction = self.direction;
        out.food = self.food;
        out.power_up = self.power_up;
        out.power_up_timer = self.power_up_timer;
        out.score = self.score;
        out.game_over = self.game_over;
        out.ticks = self.ticks;
        out.episode_id = self.episode_id;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Request a new heading.
    ///
    /// Reversing onto the neck is silently ignored, as is any request after
    /// game over. Requests are not queued: the last accepted one before the
    /// next tick wins. Returns whether the request was accepted.
    pub fn change_direction(&mut self, requested: Direction) -> bool {
        if self.game_over || requested == self.direction.opposite() {
            return false;
        }
        self.direction = requested;
        true
    }

    /// Advance the game by one step. Returns whether the snake moved.
    pub fn tick(&mut self) -> bool {
        if self.game_over {
            return false;
        }

        let new_head = self.snake.head().step(self.direction);

        if !new_head.in_bounds(self.config.width, self.config.height) {
            debug!("game over: wall at ({}, {})", new_head.x, new_head.y);
            self.game_over = true;
            return false;
        }

        // Checked before the tail moves, so entering the tail cell is fatal too.
        if self.snake.contains(new_head) {
            debug!("game over: self collision at ({}, {})", new_head.x, new_head.y);
            self.game_over = true;
            return false;
        }

        self.snake.push_head(new_head);
        self.ticks += 1;

        if new_head == self.food {
            self.score += self.config.food_score;
            self.power_up_timer = 0;
            self.power_up = None;
            debug!("food eaten, length {}, score {}", self.snake.len(), self.score);
            self.place_food();
        } else {
            self.snake.shed_tail();
        }

        self.power_up_timer += 1;
        if self.power_up_timer >= self.config.power_up_spawn_ticks && self.power_up.is_none() {
            self.spawn_power_up();
        }

        if let Some(power_up) = self.power_up {
            if power_up.position == new_head {
                self.apply_power_up(power_up.kind);
                self.score += self.config.power_up_score;
                self.power_up = None;
                debug!("power-up {} collected, score {}", power_up.kind.as_str(), self.score);
            }
        }

        true
    }

    /// Throw the current game away and start a fresh one.
    pub fn reset(&mut self) {
        self.episode_id = self.episode_id.wrapping_add(1);
        self.restart();
    }

    /// Apply a player action. Returns whether it changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Turn(dir) => self.change_direction(dir),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }

    fn restart(&mut self) {
        self.snake = Snake::new(self.config.center());
        self.direction = Direction::ALL[self.rng.next_below(Direction::ALL.len() as u32) as usize];
        self.power_up = None;
        self.power_up_timer = 0;
        self.score = 0;
        self.game_over = false;
        self.ticks = 0;
        self.place_food();
    }

    fn place_food(&mut self) {
        let snake = &self.snake;
        match sample_free_cell(&mut self.rng, &self.config, snake.len(), |p| snake.contains(p)) {
            Some(pos) => self.food = pos,
            None => {
                // Snake covers the whole grid.
                debug!("game over: no free cell for food");
                self.game_over = true;
            }
        }
    }

    fn spawn_power_up(&mut self) {
        if self.config.power_up_kinds.is_empty() {
            return;
        }

        let snake = &self.snake;
        let food = self.food;
        let Some(position) = sample_free_cell(&mut self.rng, &self.config, snake.len() + 1, |p| {
            p == food || snake.contains(p)
        }) else {
            return;
        };

        let kinds = &self.config.power_up_kinds;
        let kind = kinds[self.rng.next_below(kinds.len() as u32) as usize];
        self.power_up = Some(PowerUp { position, kind });
        self.power_up_timer = 0;
        debug!("power-up {} spawned at ({}, {})", kind.as_str(), position.x, position.y);
    }

    fn apply_power_up(&mut self, kind: PowerUpKind) {
        match kind {
            PowerUpKind::ShedTail => {
                self.snake.shed_tail();
            }
        }
    }
}

/// Pick a uniformly random cell for which `is_blocked` is false.
///
/// Draws `x` then `y` until a free cell comes up. After a bounded number of
/// misses it picks uniformly among the free cells found by a scan. Returns
/// `None` when at least `blocked` cells are known taken and that covers the grid,
/// or the scan finds nothing.
fn sample_free_cell<R: RandomSource>(
    rng: &mut R,
    config: &GameConfig,
    blocked: usize,
    is_blocked: impl Fn(Position) -> bool,
) -> Option<Position> {
    let cells = config.cell_count();
    if blocked >= cells {
        return None;
    }

    let (w, h) = (config.width as u32, config.height as u32);
    for _ in 0..cells.saturating_mul(SAMPLE_ATTEMPTS_PER_CELL) {
        let pos = Position::new(rng.next_below(w) as i16, rng.next_below(h) as i16);
        if !is_blocked(pos) {
            return Some(pos);
        }
    }

    let free: Vec<Position> = (0..h as i16)
        .flat_map(|y| (0..w as i16).map(move |x| Position::new(x, y)))
        .filter(|&p| !is_blocked(p))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.next_below(free.len() as u32) as usize])
}
