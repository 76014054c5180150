use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::oneshot;

use tui_snake::adapter::server::{run_server, ServerConfig};
use tui_snake::types::GameConfig;

async fn start_server(tick_ms: u32, game: GameConfig) -> SocketAddr {
    let config = ServerConfig {
        port: 0,
        tick_ms,
        seed: 7,
        game,
        ..ServerConfig::default()
    };
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });

    tokio::time::timeout(Duration::from_secs(2), ready_rx)
        .await
        .expect("server did not signal ready")
        .expect("ready channel dropped")
}

async fn connect(addr: SocketAddr) -> (Lines<BufReader<OwnedReadHalf>>, OwnedWriteHalf) {
    let stream = TcpStream::connect(addr).await.expect("connect failed");
    let (read_half, write_half) = stream.into_split();
    (BufReader::new(read_half).lines(), write_half)
}

async fn send(writer: &mut OwnedWriteHalf, line: &str) {
    writer.write_all(line.as_bytes()).await.unwrap();
    writer.write_all(b"\n").await.unwrap();
    writer.flush().await.unwrap();
}

async fn recv(lines: &mut Lines<BufReader<OwnedReadHalf>>) -> serde_json::Value {
    let line = tokio::time::timeout(Duration::from_secs(2), lines.next_line())
        .await
        .expect("timed out waiting for a line")
        .unwrap()
        .expect("connection closed");
    serde_json::from_str(&line).unwrap()
}

#[tokio::test]
async fn adapter_welcome_command_ack_and_observe() {
    // Ticks far apart so replies are not interleaved with observations.
    let addr = start_server(60_000, GameConfig::default()).await;
    let (mut lines, mut writer) = connect(addr).await;

    let welcome = recv(&mut lines).await;
    assert_eq!(welcome["type"], "welcome");
    assert_eq!(welcome["protocol_version"], "1.0.0");
    assert_eq!(welcome["width"], 30);
    assert_eq!(welcome["tick_ms"], 60_000);

    send(&mut writer, r#"{"type":"observe"}"#).await;
    let obs = recv(&mut lines).await;
    assert_eq!(obs["type"], "observation");
    assert_eq!(obs["score"], 0);
    assert_eq!(obs["game_over"], false);
    assert_eq!(obs["snake"].as_array().unwrap().len(), 1);

    send(&mut writer, r#"{"type":"command","action":"reset"}"#).await;
    let ack = recv(&mut lines).await;
    assert_eq!(ack["type"], "ack");
    assert_eq!(ack["action"], "reset");

    send(&mut writer, r#"{"type":"observe"}"#).await;
    assert_eq!(recv(&mut lines).await["episode_id"], 1);
}

#[tokio::test]
async fn adapter_reports_errors_and_keeps_session() {
    let addr = start_server(60_000, GameConfig::default()).await;
    let (mut lines, mut writer) = connect(addr).await;
    recv(&mut lines).await;

    send(&mut writer, "not json").await;
    let err = recv(&mut lines).await;
    assert_eq!(err["type"], "error");
    assert_eq!(err["code"], "invalid_message");

    send(&mut writer, r#"{"type":"command","action":"jump"}"#).await;
    assert_eq!(recv(&mut lines).await["code"], "unknown_action");

    send(&mut writer, r#"{"type":"observe"}"#).await;
    assert_eq!(recv(&mut lines).await["type"], "observation");
}

#[tokio::test]
async fn adapter_streams_ticks_until_game_over() {
    let game = GameConfig {
        width: 6,
        height: 6,
        ..GameConfig::default()
    };
    let addr = start_server(10, game).await;
    let (mut lines, _writer) = connect(addr).await;
    recv(&mut lines).await;

    // Without steering the snake reaches a wall within 4 ticks.
    let mut last_ticks = 0;
    loop {
        let obs = recv(&mut lines).await;
        assert_eq!(obs["type"], "observation");
        let ticks = obs["ticks"].as_u64().unwrap();
        assert!(ticks >= last_ticks);
        last_ticks = ticks;
        if obs["game_over"] == true {
            break;
        }
    }

    // Nothing more arrives once the game is over.
    let quiet = tokio::time::timeout(Duration::from_millis(100), lines.next_line()).await;
    assert!(quiet.is_err());
}

#[tokio::test]
async fn adapter_sessions_are_independent() {
    let addr = start_server(60_000, GameConfig::default()).await;
    let (mut lines_a, mut writer_a) = connect(addr).await;
    let (mut lines_b, mut writer_b) = connect(addr).await;
    recv(&mut lines_a).await;
    recv(&mut lines_b).await;

    send(&mut writer_a, r#"{"type":"command","action":"reset"}"#).await;
    recv(&mut lines_a).await;

    send(&mut writer_a, r#"{"type":"observe"}"#).await;
    send(&mut writer_b, r#"{"type":"observe"}"#).await;
    assert_eq!(recv(&mut lines_a).await["episode_id"], 1);
    assert_eq!(recv(&mut lines_b).await["episode_id"], 0);
}

#[tokio::test]
async fn adapter_screenshots_stay_in_screenshot_dir() {
    let dir = std::env::temp_dir().join(format!("tui-snake-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let config = ServerConfig {
        port: 0,
        tick_ms: 60_000,
        screenshot_dir: dir.clone(),
        ..ServerConfig::default()
    };
    let (ready_tx, ready_rx) = oneshot::channel();
    tokio::spawn(async move {
        let _ = run_server(config, Some(ready_tx)).await;
    });
    let addr = ready_rx.await.unwrap();

    let (mut lines, mut writer) = connect(addr).await;
    recv(&mut lines).await;

    for path in ["../escape.ppm", "/tmp/escape.ppm"] {
        send(&mut writer, &format!(r#"{{"type":"screenshot","path":"{path}"}}"#)).await;
        let err = recv(&mut lines).await;
        assert_eq!(err["type"], "error");
        assert_eq!(err["code"], "screenshot_failed");
    }

    send(&mut writer, r#"{"type":"screenshot","path":"frame.png"}"#).await;
    assert_eq!(recv(&mut lines).await["action"], "screenshot");
    assert!(dir.join("frame.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}
