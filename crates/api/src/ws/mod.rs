//! WebSocket infrastructure for live notification push.
//!
//! Provides connection management, heartbeat pings, and the HTTP upgrade
//! handler mounted at `/api/ws?token=<access token>`.

mod handler;
mod heartbeat;
pub mod manager;

pub use handler::{authorize_socket, ws_handler, ClientMessage, SocketUser};
pub use heartbeat::start_heartbeat;
pub use manager::WsManager;
