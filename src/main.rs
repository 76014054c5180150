//! Terminal Snake runner (default binary).
//!
//! `tui-snake` plays in the terminal; `tui-snake serve` runs the TCP session
//! server instead. Both read the same flags and `SNAKE_*` variables.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use tui_snake::config::{AppConfig, Mode};
use tui_snake::core::{GameSnapshot, GameState, SimpleRng};
use tui_snake::input::{handle_key_event, should_quit};
use tui_snake::logging;
use tui_snake::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::load(&args)?;
    logging::init(&config)?;

    let seed = config.resolve_seed();
    info!("starting in {:?} mode, seed {}", config.mode, seed);

    match config.mode {
        Mode::Serve => serve(&config, seed),
        Mode::Play => play(&config, seed),
    }
}

fn serve(config: &AppConfig, seed: u32) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(tui_snake::adapter::run_server(config.server_config(seed), None))
}

fn play(config: &AppConfig, seed: u32) -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, config, seed);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &AppConfig, seed: u32) -> Result<()> {
    let mut game = GameState::new(config.game_config(), SimpleRng::new(seed));
    let view = GameView::default();
    let mut snapshot = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();
    let mut dirty = true;

    loop {
        if dirty {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            game.snapshot_into(&mut snapshot);
            view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        info!("quit, final score {}", game.score());
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        dirty |= game.apply_action(action);
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    dirty = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let was_over = game.game_over();
            dirty |= game.tick();
            if !was_over && game.game_over() {
                info!("game over, score {}, length {}", game.score(), game.snake().len());
                dirty = true;
            }
        }
    }
}
