use dk_core::Millis;

/// Aborts a connection that has gone quiet for too long. Armed on
/// construction and rearmed on every successful read, mirroring the
/// original transport's receive-inactivity timer; a zero timeout disables
/// the watchdog entirely.
#[derive(Debug, Clone, Copy)]
pub struct InactivityWatchdog {
    timeout: Millis,
    deadline: Option<Millis>,
}

impl InactivityWatchdog {
    pub fn new(now: Millis, timeout: Millis) -> Self {
        let mut watchdog = Self { timeout, deadline: None };
        watchdog.restart(now);
        watchdog
    }

    /// Reset the inactivity clock; call after every successful read.
    pub fn restart(&mut self, now: Millis) {
        self.deadline = if self.timeout > 0 { Some(now + self.timeout) } else { None };
    }

    pub fn expired(&self, now: Millis) -> bool {
        matches!(self.deadline, Some(deadline) if now >= deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_never_expires() {
        let watchdog = InactivityWatchdog::new(0, 0);
        assert!(!watchdog.expired(1_000_000));
    }

    #[test]
    fn expires_after_timeout_with_no_restart() {
        let watchdog = InactivityWatchdog::new(0, 5_000);
        assert!(!watchdog.expired(4_999));
        assert!(watchdog.expired(5_000));
    }

    #[test]
    fn restart_pushes_the_deadline_out() {
        let mut watchdog = InactivityWatchdog::new(0, 5_000);
        watchdog.restart(4_000);
        assert!(!watchdog.expired(8_999));
        assert!(watchdog.expired(9_000));
    }
}
