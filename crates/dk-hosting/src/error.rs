use std::fmt;

#[derive(Debug, Clone)]
pub enum ProtocolError {
    Malformed(String),
    UnknownChair { chair: usize },
    RoomFull,
    RoomNotFound,
    PasswordMismatch,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(s) => write!(f, "malformed client message: {s}"),
            Self::UnknownChair { chair } => write!(f, "no such chair: {chair}"),
            Self::RoomFull => write!(f, "room has no open chairs"),
            Self::RoomNotFound => write!(f, "room not found"),
            Self::PasswordMismatch => write!(f, "room password did not match"),
        }
    }
}

impl std::error::Error for ProtocolError {}
