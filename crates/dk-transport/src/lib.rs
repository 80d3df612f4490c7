//! Framed, length-prefixed, optionally-compressed message transport.
//! Grounded on the original socket transport's 16-bit header scheme; carries
//! no socket I/O of its own, only the framing and reassembly logic that sits
//! on top of whatever byte stream the hosting layer reads from.

mod compress;
mod error;
mod frame;
mod reassembler;
mod watchdog;

pub use error::TransportError;
pub use frame::encode_frame;
pub use frame::CompressionMode;
pub use frame::HeaderMode;
pub use reassembler::FrameReassembler;
pub use watchdog::InactivityWatchdog;
