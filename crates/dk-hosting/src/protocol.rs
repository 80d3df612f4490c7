use crate::error::ProtocolError;
use crate::message::encode_event;
use crate::message::ClientMessage;
use crate::message::ServerMessage;
use dk_draft::Event;

/// Centralizes the boundary between the wire format and the draft reducer's
/// own command/event types. Holds no state of its own.
pub struct Protocol;

impl Protocol {
    pub fn encode(event: &Event) -> ServerMessage {
        encode_event(event)
    }

    pub fn decode(text: &str) -> Result<ClientMessage, ProtocolError> {
        serde_json::from_str(text).map_err(|e| ProtocolError::Malformed(e.to_string()))
    }
}
