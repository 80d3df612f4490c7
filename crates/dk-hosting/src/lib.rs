//! Live room hosting: wire message shapes, the protocol boundary, a
//! reducer-driven Room, and both WebSocket and raw-TCP bridging onto it.

mod adapter;
mod error;
mod message;
mod protocol;
mod room;
mod tcp;

pub mod handlers;
pub mod lobby;

pub use error::ProtocolError;
pub use lobby::Lobby;
pub use message::ClientMessage;
pub use message::ServerMessage;
pub use protocol::Protocol;
pub use room::Room;
pub use tcp::accept_loop;
pub use tcp::serve_room_tcp;
