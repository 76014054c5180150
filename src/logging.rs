//! File logging.
//!
//! The terminal owns stdout while playing, so log records go to a file.

use std::fs::File;

use anyhow::{Context, Result};
use simplelog::{Config, WriteLogger};

use crate::config::AppConfig;

pub fn init(config: &AppConfig) -> Result<()> {
    let file = File::create(&config.log_path)
        .with_context(|| format!("failed to create log file {}", config.log_path))?;

    WriteLogger::init(config.log_level, Config::default(), file)
        .context("logger already initialized")?;
    Ok(())
}
