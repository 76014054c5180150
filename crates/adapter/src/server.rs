//! TCP server for game sessions
//!
//! Accepts connections and runs one independent [`Session`] per client,
//! each with its own tick interval. Uses tokio for async networking.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use log::{info, warn};
use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::protocol::{encode_line, ServerMessage};
use crate::session::Session;
use crate::types::{GameConfig, CELL_SIZE_PX, TICK_MS};

pub const DEFAULT_PORT: u16 = 7878;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub tick_ms: u32,
    pub cell_px: u16,
    /// Session `n` (counting from 1) plays with seed `seed + n`.
    pub seed: u32,
    pub game: GameConfig,
    /// Where `screenshot` requests write their files.
    pub screenshot_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            tick_ms: TICK_MS,
            cell_px: CELL_SIZE_PX,
            seed: 1,
            game: GameConfig::default(),
            screenshot_dir: PathBuf::from("."),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Start the TCP server.
///
/// `ready_tx` receives the bound address once the listener is up, which lets
/// callers bind port 0 and learn the real port.
pub async fn run_server(
    config: ServerConfig,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let listener = TcpListener::bind(config.bind_addr()).await?;
    let bound = listener.local_addr()?;
    info!("session server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    let mut session_counter = 0u32;

    loop {
        let (socket, addr) = listener.accept().await?;
        session_counter = session_counter.wrapping_add(1);
        let session_id = session_counter;
        info!("session {} connected from {}", session_id, addr);

        let config = config.clone();
        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, session_id, config).await {
                warn!("session {} error: {:#}", session_id, e);
            }
            info!("session {} disconnected", session_id);
        });
    }
}

/// Drive a single connection until the client hangs up.
async fn handle_client(socket: TcpStream, session_id: u32, config: ServerConfig) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    let mut session = Session::new(
        config.game.clone(),
        config.seed.wrapping_add(session_id),
        config.cell_px,
        config.screenshot_dir.clone(),
    );

    send(&mut writer, &mut buf, &session.welcome(config.tick_ms)).await?;

    let period = Duration::from_millis(config.tick_ms.max(1) as u64);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(obs) = session.tick() {
                    if session.game().game_over() {
                        info!(
                            "session {} game over, score {}",
                            session_id,
                            session.game().score()
                        );
                    }
                    send(&mut writer, &mut buf, &obs).await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let reply = session.handle_line(trimmed);
                if let ServerMessage::Error(err) = &reply {
                    warn!("session {} rejected {:?}: {}", session_id, trimmed, err.message);
                }
                send(&mut writer, &mut buf, &reply).await?;
            }
        }
    }

    Ok(())
}

async fn send<W: AsyncWrite + Unpin>(
    writer: &mut W,
    buf: &mut Vec<u8>,
    msg: &ServerMessage,
) -> anyhow::Result<()> {
    encode_line(msg, buf)?;
    writer.write_all(buf).await?;
    writer.flush().await?;
    Ok(())
}
