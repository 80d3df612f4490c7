use std::fmt;

/// Errors raised while framing or reassembling messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The payload exceeded `dk_core::MAX_BRIEF_PAYLOAD` while framing in
    /// brief-only header mode.
    PayloadTooLarge { size: usize },
    /// A received frame failed to decompress.
    DecompressionFailed,
    /// The frame declared a body larger than the configured limit.
    FrameTooLarge { declared: u32, limit: u32 },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PayloadTooLarge { size } => {
                write!(f, "payload too large ({size} bytes) to send with a brief header")
            }
            Self::DecompressionFailed => write!(f, "failed to decompress received frame"),
            Self::FrameTooLarge { declared, limit } => {
                write!(f, "declared frame size {declared} exceeds limit {limit}")
            }
        }
    }
}

impl std::error::Error for TransportError {}
