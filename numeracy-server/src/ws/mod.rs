//! WebSocket module for assessment sessions

mod connection;
mod handler;
mod protocol;

pub use connection::{ConnectQuery, ws_handler};
pub use handler::SessionHandler;
pub use protocol::{ClientMessage, ServerMessage, parse_client_message};
