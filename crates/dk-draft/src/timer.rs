use dk_core::Millis;

/// Per-seat selection deadline tracked against an injected logical clock
/// rather than a wall clock, so scenarios like "timer expires after 1000ms"
/// are exercised deterministically in tests without sleeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Millis>,
}

impl Timer {
    pub fn cleared() -> Self {
        Self { deadline: None }
    }

    /// Start a timer that expires `duration_ms` after `now`. A duration of
    /// zero disables the timer (selection time = 0 means no timeout).
    pub fn start(now: Millis, duration_ms: Millis) -> Self {
        if duration_ms == 0 {
            Self::cleared()
        } else {
            Self {
                deadline: Some(now + duration_ms),
            }
        }
    }

    pub fn clear(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn expired(&self, now: Millis) -> bool {
        self.deadline.map(|d| now >= d).unwrap_or(false)
    }
}
