use std::fmt;

/// Coarse error wrapper shared by crates that don't need their own enum.
/// Module-specific errors (`SelectionError`, `ConfigError`, `TransportError`)
/// live in their own crates and are not routed through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    Invariant(String),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invariant(msg) => write!(f, "invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for DraftError {}
