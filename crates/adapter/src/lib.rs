//! Adapter module - play snake over a TCP socket with a JSON protocol
//!
//! Lets bots and scripts play the game without a terminal.
//!
//! # Protocol Overview
//!
//! The adapter implements a **line-delimited JSON protocol** over TCP:
//!
//! 1. **Connection**: Client connects to the TCP socket (default: 127.0.0.1:7878)
//! 2. **Welcome**: Server immediately sends `welcome` with the grid size and tick period
//! 3. **Observation Streaming**: Every tick that moves the snake sends an `observation`
//! 4. **Commanding**: Client sends `command` messages to steer or reset
//!
//! Each connection is its own game: sessions never share state, and the game
//! ends for good when the socket closes.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **command**: Apply an action (`up`, `down`, `left`, `right`, `reset`)
//! - **observe**: Request an observation right away
//! - **screenshot**: Write the current frame as a PPM image
//!
//! ## Server → Client
//!
//! - **welcome**: Sent on connect
//! - **observation**: Full game snapshot (snake, food, power-up, score, ...)
//! - **ack**: Command or screenshot acknowledgment
//! - **error**: Error response with code and message
//!
//! Once the game is over the tick stream goes quiet until a `reset`.
//!
//! # Example Protocol Flow
//!
//! ```text
//! Server -> Client: {"type":"welcome","protocol_version":"1.0.0","width":30,"height":30,"tick_ms":200}
//! Client -> Server: {"type":"command","action":"up"}
//! Server -> Client: {"type":"ack","action":"up"}
//! Server -> Client: {"type":"observation","width":30,"height":30,"snake":[{"x":15,"y":14}],...}
//! ```
//!
//! # Testing
//!
//! ```bash
//! tui-snake serve --port 7878 &
//! nc 127.0.0.1 7878
//! {"type":"observe"}
//! ```

pub mod protocol;
pub mod server;
pub mod session;

pub use tui_snake_core as core;
pub use tui_snake_term as term;
pub use tui_snake_types as types;

pub use protocol::*;
pub use server::{run_server, ServerConfig, DEFAULT_PORT};
pub use session::Session;
