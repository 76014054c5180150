//! Protocol module - JSON message types for the session server
//!
//! Every message is one JSON object per line, tagged by its `type` field.

use serde::{Deserialize, Serialize};

use crate::core::GameSnapshot;

pub const PROTOCOL_VERSION: &str = "1.0.0";

// ============== Client -> Server Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// A game action by name: `up`, `down`, `left`, `right` or `reset`.
    Command { action: String },
    /// Ask for an observation right away.
    Observe,
    /// Write the current frame as a PPM image at `path` (server side).
    Screenshot { path: String },
}

// ============== Server -> Client Messages ==============

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome(WelcomeMessage),
    Observation(GameSnapshot),
    Ack(AckMessage),
    Error(ErrorMessage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub protocol_version: String,
    pub width: u8,
    pub height: u8,
    pub tick_ms: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AckMessage {
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidMessage,
    UnknownAction,
    ScreenshotFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub code: ErrorCode,
    pub message: String,
}

impl ServerMessage {
    pub fn ack(action: impl Into<String>) -> Self {
        ServerMessage::Ack(AckMessage {
            action: action.into(),
        })
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        ServerMessage::Error(ErrorMessage {
            code,
            message: message.into(),
        })
    }
}

/// Parse one inbound line.
pub fn parse_message(line: &str) -> Result<ClientMessage, ErrorMessage> {
    serde_json::from_str(line).map_err(|e| ErrorMessage {
        code: ErrorCode::InvalidMessage,
        message: e.to_string(),
    })
}

/// Serialize `msg` as a single line (with trailing newline) into `buf`.
pub fn encode_line(msg: &ServerMessage, buf: &mut Vec<u8>) -> serde_json::Result<()> {
    buf.clear();
    serde_json::to_writer(&mut *buf, msg)?;
    buf.push(b'\n');
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    #[test]
    fn parses_client_messages() {
        assert_eq!(
            parse_message(r#"{"type":"command","action":"up"}"#).unwrap(),
            ClientMessage::Command {
                action: "up".to_string()
            }
        );
        assert_eq!(
            parse_message(r#"{"type":"observe"}"#).unwrap(),
            ClientMessage::Observe
        );
        assert_eq!(
            parse_message(r#"{"type":"screenshot","path":"out.ppm"}"#).unwrap(),
            ClientMessage::Screenshot {
                path: "out.ppm".to_string()
            }
        );
    }

    #[test]
    fn rejects_unknown_type_and_garbage() {
        let err = parse_message(r#"{"type":"hello"}"#).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidMessage);
        assert!(parse_message("not json").is_err());
        assert!(parse_message(r#"{"type":"command"}"#).is_err());
    }

    #[test]
    fn observation_flattens_snapshot_fields() {
        let mut snap = GameSnapshot::default();
        snap.snake = vec![Position::new(15, 15)];
        snap.score = 30;

        let mut buf = Vec::new();
        encode_line(&ServerMessage::Observation(snap), &mut buf).unwrap();
        assert_eq!(buf.last(), Some(&b'\n'));

        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["type"], "observation");
        assert_eq!(v["score"], 30);
        assert_eq!(v["direction"], "right");
        assert_eq!(v["snake"][0]["x"], 15);
        assert!(v["power_up"].is_null());
    }

    #[test]
    fn error_codes_are_snake_case() {
        let mut buf = Vec::new();
        encode_line(
            &ServerMessage::error(ErrorCode::UnknownAction, "jump"),
            &mut buf,
        )
        .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(v["type"], "error");
        assert_eq!(v["code"], "unknown_action");
        assert_eq!(v["message"], "jump");
    }

    #[test]
    fn server_messages_parse_back() {
        let welcome = ServerMessage::Welcome(WelcomeMessage {
            protocol_version: PROTOCOL_VERSION.to_string(),
            width: 30,
            height: 30,
            tick_ms: 200,
        });
        let line = serde_json::to_string(&welcome).unwrap();
        assert!(line.contains(r#""type":"welcome""#));
        assert_eq!(serde_json::from_str::<ServerMessage>(&line).unwrap(), welcome);
    }
}
