//! Soufflée inactivity deadline

use std::time::{Duration, Instant};

/// Time a player has to continue a capture chain under the soufflée rule
pub const SOUFFLEE_TIMEOUT: Duration = Duration::from_millis(4000);

/// Single-shot deadline, re-armed after every ply of a capture chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SouffleeTimer {
    deadline: Option<Instant>,
}

impl SouffleeTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) the countdown from `now`
    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + SOUFFLEE_TIMEOUT);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Whether the deadline has passed at `now`
    pub fn expired(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unarmed_never_expires() {
        let timer = SouffleeTimer::new();
        assert!(!timer.is_armed());
        assert!(!timer.expired(Instant::now() + Duration::from_secs(60)));
        assert_eq!(timer.remaining(Instant::now()), None);
    }

    #[test]
    fn test_expires_after_timeout() {
        let start = Instant::now();
        let mut timer = SouffleeTimer::new();
        timer.arm(start);
        assert!(!timer.expired(start + Duration::from_millis(3999)));
        assert!(timer.expired(start + SOUFFLEE_TIMEOUT));
        assert_eq!(timer.remaining(start + Duration::from_secs(10)), Some(Duration::ZERO));
    }

    #[test]
    fn test_rearm_and_cancel() {
        let start = Instant::now();
        let mut timer = SouffleeTimer::new();
        timer.arm(start);
        let later = start + Duration::from_millis(3000);
        timer.arm(later);
        assert!(!timer.expired(start + Duration::from_millis(4500)));
        timer.cancel();
        assert!(!timer.expired(later + SOUFFLEE_TIMEOUT));
    }
}
