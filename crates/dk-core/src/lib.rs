//! Core type aliases, identifiers, and constants shared across the draft-kit
//! workspace.
#![allow(dead_code)]

mod error;
mod logging;

pub use error::DraftError;
pub use logging::init_logging;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Seat index around the draft table.
pub type Chair = usize;
/// Monotonic pick counter within a round.
pub type PickIndex = u32;
/// Round index within a draft (0-based).
pub type RoundIndex = i32;
/// Milliseconds on the injectable logical clock used by timers.
pub type Millis = u64;
/// Probability in [0.0, 1.0), e.g. the mythic-rare composite-slot roll.
pub type Probability = f64;

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> uuid::Uuid {
        self.inner
    }
    /// Cast ID<T> to ID<U> while preserving the underlying UUID.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for uuid::Uuid {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self {
            inner: uuid::Uuid::now_v7(),
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}
impl<'de, T> serde::Deserialize<'de> for ID<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        uuid::Uuid::deserialize(deserializer).map(ID::from)
    }
}

// ============================================================================
// DRAFT PARAMETERS
// ============================================================================
/// Default probability that a rare-or-mythic composite slot resolves to Mythic.
pub const DEFAULT_MYTHIC_RARE_PROBABILITY: Probability = 0.125;
/// Minimum legal chair count for any room.
pub const MIN_CHAIR_COUNT: usize = 2;
/// Chair count fixed for grid rounds.
pub const GRID_CHAIR_COUNT: usize = 2;
/// Grid round side length (3x3).
pub const GRID_SIDE: usize = 3;
/// Default receive-inactivity watchdog, in milliseconds. 0 disables it.
pub const DEFAULT_WATCHDOG_MILLIS: Millis = 30_000;
/// Largest payload that fits in a brief (non-extended) frame header.
pub const MAX_BRIEF_PAYLOAD: usize = 0x3FFF;
