//! One game session: the state owned by a single connection.
//!
//! Pure request/response logic with no sockets, so it can be driven from
//! tests as well as from the server loop.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Result};
use log::debug;

use crate::core::{GameSnapshot, GameState, SimpleRng};
use crate::protocol::{
    parse_message, ClientMessage, ErrorCode, ServerMessage, WelcomeMessage, PROTOCOL_VERSION,
};
use crate::term::RasterView;
use crate::types::{GameAction, GameConfig};

pub struct Session {
    game: GameState<SimpleRng>,
    snapshot: GameSnapshot,
    raster: RasterView,
    screenshot_dir: PathBuf,
}

impl Session {
    /// Screenshots are only ever written inside `screenshot_dir`.
    pub fn new(config: GameConfig, seed: u32, cell_px: u16, screenshot_dir: impl Into<PathBuf>) -> Self {
        Self {
            game: GameState::new(config, SimpleRng::new(seed)),
            snapshot: GameSnapshot::default(),
            raster: RasterView::new(cell_px),
            screenshot_dir: screenshot_dir.into(),
        }
    }

    pub fn game(&self) -> &GameState<SimpleRng> {
        &self.game
    }

    pub fn welcome(&self, tick_ms: u32) -> ServerMessage {
        let config = self.game.config();
        ServerMessage::Welcome(WelcomeMessage {
            protocol_version: PROTOCOL_VERSION.to_string(),
            width: config.width,
            height: config.height,
            tick_ms,
        })
    }

    pub fn observation(&mut self) -> ServerMessage {
        self.game.snapshot_into(&mut self.snapshot);
        ServerMessage::Observation(self.snapshot.clone())
    }

    /// Advance one tick. Returns an observation when the tick changed the
    /// game, including the tick that ended it; nothing once it is over.
    pub fn tick(&mut self) -> Option<ServerMessage> {
        if self.game.game_over() {
            return None;
        }
        self.game.tick();
        Some(self.observation())
    }

    /// Handle one inbound line and produce the reply.
    pub fn handle_line(&mut self, line: &str) -> ServerMessage {
        match parse_message(line) {
            Ok(msg) => self.handle_message(msg),
            Err(err) => ServerMessage::Error(err),
        }
    }

    pub fn handle_message(&mut self, msg: ClientMessage) -> ServerMessage {
        match msg {
            ClientMessage::Command { action } => match GameAction::from_str(&action) {
                Some(action) => {
                    self.game.apply_action(action);
                    ServerMessage::ack(action.as_str())
                }
                None => ServerMessage::error(
                    ErrorCode::UnknownAction,
                    format!("unknown action: {action}"),
                ),
            },
            ClientMessage::Observe => self.observation(),
            ClientMessage::Screenshot { path } => match self.screenshot(&path) {
                Ok(()) => ServerMessage::ack("screenshot"),
                Err(e) => ServerMessage::error(ErrorCode::ScreenshotFailed, format!("{e:#}")),
            },
        }
    }

    fn screenshot(&mut self, name: &str) -> Result<()> {
        let path = screenshot_path(&self.screenshot_dir, name)?;
        self.game.snapshot_into(&mut self.snapshot);
        self.raster.save(&self.snapshot, &path)?;
        debug!("screenshot written to {}", path.display());
        Ok(())
    }
}

/// Resolve a client-supplied screenshot name inside `dir`.
///
/// Only a bare file name is accepted: no directories, no `..`, no absolute
/// paths.
fn screenshot_path(dir: &Path, name: &str) -> Result<PathBuf> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(file)), None) => Ok(dir.join(file)),
        _ => bail!("screenshot path must be a plain file name: {:?}", name),
    }
}
