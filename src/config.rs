//! Runtime configuration for the `tui-snake` binary.
//!
//! Built from defaults, then `SNAKE_*` environment variables, then
//! command-line flags. Later sources win.

use anyhow::{anyhow, ensure, Context, Result};
use log::LevelFilter;

use crate::adapter::{ServerConfig, DEFAULT_PORT};
use crate::types::{GameConfig, CELL_SIZE_PX, POWER_UP_SPAWN_TICKS, TICK_MS};

pub const DEFAULT_LOG_PATH: &str = "tui-snake.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Play in the terminal.
    Play,
    /// Run the TCP session server.
    Serve,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub mode: Mode,
    pub width: u8,
    pub height: u8,
    pub cell_px: u16,
    pub tick_ms: u32,
    /// `None` picks a random seed at startup.
    pub seed: Option<u32>,
    pub power_up_ticks: u32,
    pub log_path: String,
    pub log_level: LevelFilter,
    pub host: String,
    pub port: u16,
    pub screenshot_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let game = GameConfig::default();
        Self {
            mode: Mode::Play,
            width: game.width,
            height: game.height,
            cell_px: CELL_SIZE_PX,
            tick_ms: TICK_MS,
            seed: None,
            power_up_ticks: POWER_UP_SPAWN_TICKS,
            log_path: DEFAULT_LOG_PATH.to_string(),
            log_level: LevelFilter::Info,
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            screenshot_dir: ".".to_string(),
        }
    }
}

impl AppConfig {
    /// Read the process environment and arguments (without the program name).
    pub fn load(args: &[String]) -> Result<Self> {
        Self::from_sources(args, |key| std::env::var(key).ok())
    }

    /// Build from `args` and an environment lookup.
    pub fn from_sources(args: &[String], env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(env)?;
        config.apply_args(args)?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) -> Result<()> {
        let get = |key: &str| {
            env(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("SNAKE_WIDTH") {
            self.width = parse_value("SNAKE_WIDTH", &v)?;
        }
        if let Some(v) = get("SNAKE_HEIGHT") {
            self.height = parse_value("SNAKE_HEIGHT", &v)?;
        }
        if let Some(v) = get("SNAKE_CELL_PX") {
            self.cell_px = parse_value("SNAKE_CELL_PX", &v)?;
        }
        if let Some(v) = get("SNAKE_TICK_MS") {
            self.tick_ms = parse_value("SNAKE_TICK_MS", &v)?;
        }
        if let Some(v) = get("SNAKE_SEED") {
            self.seed = Some(parse_value("SNAKE_SEED", &v)?);
        }
        if let Some(v) = get("SNAKE_POWER_UP_TICKS") {
            self.power_up_ticks = parse_value("SNAKE_POWER_UP_TICKS", &v)?;
        }
        if let Some(v) = get("SNAKE_LOG_PATH") {
            self.log_path = v;
        }
        if let Some(v) = get("SNAKE_LOG_LEVEL") {
            self.log_level = parse_level(&v)?;
        }
        if let Some(v) = get("SNAKE_HOST") {
            self.host = v;
        }
        if let Some(v) = get("SNAKE_PORT") {
            self.port = parse_value("SNAKE_PORT", &v)?;
        }
        if let Some(v) = get("SNAKE_SCREENSHOT_DIR") {
            self.screenshot_dir = v;
        }
        Ok(())
    }

    fn apply_args(&mut self, args: &[String]) -> Result<()> {
        let mut i = 0usize;
        if args.first().map(String::as_str) == Some("serve") {
            self.mode = Mode::Serve;
            i = 1;
        }

        while i < args.len() {
            let flag = args[i].as_str();
            i += 1;
            let mut value = || {
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for {}", flag))?;
                i += 1;
                Ok::<&str, anyhow::Error>(v.as_str())
            };

            match flag {
                "--width" => self.width = parse_value(flag, value()?)?,
                "--height" => self.height = parse_value(flag, value()?)?,
                "--cell-px" => self.cell_px = parse_value(flag, value()?)?,
                "--tick-ms" => self.tick_ms = parse_value(flag, value()?)?,
                "--seed" => self.seed = Some(parse_value(flag, value()?)?),
                "--power-up-ticks" => self.power_up_ticks = parse_value(flag, value()?)?,
                "--log" => self.log_path = value()?.to_string(),
                "--log-level" => self.log_level = parse_level(value()?)?,
                "--host" => self.host = value()?.to_string(),
                "--port" => self.port = parse_value(flag, value()?)?,
                "--screenshot-dir" => self.screenshot_dir = value()?.to_string(),
                other => return Err(anyhow!("unknown argument: {}", other)),
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            (2..=200).contains(&self.width),
            "width must be between 2 and 200, got {}",
            self.width
        );
        ensure!(
            (2..=200).contains(&self.height),
            "height must be between 2 and 200, got {}",
            self.height
        );
        ensure!(self.tick_ms >= 10, "tick interval must be at least 10 ms, got {}", self.tick_ms);
        ensure!(self.power_up_ticks >= 1, "power-up spawn ticks must be at least 1");
        ensure!(self.cell_px >= 1, "cell size must be at least 1 px");
        Ok(())
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            power_up_spawn_ticks: self.power_up_ticks,
            ..GameConfig::default()
        }
    }

    /// The configured seed, or a fresh random one.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random::<u32>)
    }

    pub fn server_config(&self, seed: u32) -> ServerConfig {
        ServerConfig {
            host: self.host.clone(),
            port: self.port,
            tick_ms: self.tick_ms,
            cell_px: self.cell_px,
            seed,
            game: self.game_config(),
            screenshot_dir: self.screenshot_dir.clone().into(),
        }
    }
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>()
        .with_context(|| format!("invalid value for {}: {:?}", name, raw))
}

fn parse_level(raw: &str) -> Result<LevelFilter> {
    raw.parse::<LevelFilter>()
        .map_err(|_| anyhow!("invalid log level: {:?}", raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_env_or_args() {
        let config = AppConfig::from_sources(&[], no_env).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.mode, Mode::Play);
        assert_eq!((config.width, config.height), (30, 30));
        assert_eq!(config.tick_ms, 200);
        assert_eq!(config.port, 7878);
    }

    #[test]
    fn flags_override_env() {
        let env: HashMap<&str, &str> = [("SNAKE_WIDTH", "40"), ("SNAKE_SEED", "9")].into();
        let config = AppConfig::from_sources(&args(&["--width", "12"]), |k| {
            env.get(k).map(|v| v.to_string())
        })
        .unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn serve_subcommand_and_network_flags() {
        let config = AppConfig::from_sources(
            &args(&["serve", "--host", "0.0.0.0", "--port", "9000", "--log-level", "debug"]),
            no_env,
        )
        .unwrap();
        assert_eq!(config.mode, Mode::Serve);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.screenshot_dir, ".");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(AppConfig::from_sources(&args(&["--width"]), no_env).is_err());
        assert!(AppConfig::from_sources(&args(&["--width", "wide"]), no_env).is_err());
        assert!(AppConfig::from_sources(&args(&["--width", "1"]), no_env).is_err());
        assert!(AppConfig::from_sources(&args(&["--tick-ms", "5"]), no_env).is_err());
        assert!(AppConfig::from_sources(&args(&["--power-up-ticks", "0"]), no_env).is_err());
        assert!(AppConfig::from_sources(&args(&["--fast"]), no_env).is_err());
        assert!(AppConfig::from_sources(&[], |k| (k == "SNAKE_PORT").then(|| "x".into())).is_err());
    }

    #[test]
    fn game_and_server_configs_follow_settings() {
        let config = AppConfig::from_sources(
            &args(&["--width", "10", "--height", "8", "--power-up-ticks", "5"]),
            no_env,
        )
        .unwrap();
        let game = config.game_config();
        assert_eq!((game.width, game.height, game.power_up_spawn_ticks), (10, 8, 5));
        assert_eq!(game.food_score, 10);

        let server = config.server_config(77);
        assert_eq!(server.seed, 77);
        assert_eq!(server.game, game);
        assert_eq!(server.bind_addr(), "127.0.0.1:7878");
    }

    #[test]
    fn explicit_seed_is_used() {
        let config = AppConfig::from_sources(&args(&["--seed", "123"]), no_env).unwrap();
        assert_eq!(config.resolve_seed(), 123);
    }
}
