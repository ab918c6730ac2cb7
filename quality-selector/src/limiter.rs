//! Rate limiting of accepted quality changes
//!
//! Two constraints, both over the caller-supplied clock: a rolling window
//! capping how many changes may land per minute, and a minimum spacing
//! between consecutive changes derived from the same budget. Requests beyond
//! budget are dropped, never queued.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

const WINDOW: Duration = Duration::from_secs(60);

/// Limits how often quality changes may be accepted.
#[derive(Debug, Clone)]
pub struct ChangeRateLimiter {
    /// Instants of changes accepted within the current window
    accepted: VecDeque<Instant>,
    max_per_window: u32,
    /// 60s divided by the per-minute budget
    min_spacing: Duration,
}

impl ChangeRateLimiter {
    /// Create a limiter allowing `max_per_minute` changes per rolling 60s.
    pub fn new(max_per_minute: u32) -> Self {
        let max_per_window = max_per_minute.max(1);
        Self {
            accepted: VecDeque::with_capacity(max_per_window as usize),
            max_per_window,
            min_spacing: WINDOW / max_per_window,
        }
    }

    /// Minimum time between accepted changes.
    pub fn min_spacing(&self) -> Duration {
        self.min_spacing
    }

    /// Whether a change at `now` would fit the budget.
    pub fn would_allow(&self, now: Instant) -> bool {
        if let Some(&last) = self.accepted.back() {
            if now.duration_since(last) < self.min_spacing {
                return false;
            }
        }
        let in_window = self
            .accepted
            .iter()
            .filter(|&&at| now.duration_since(at) < WINDOW)
            .count();
        in_window < self.max_per_window as usize
    }

    /// Consume budget for a change at `now`. Returns false when rate limited.
    pub fn try_acquire(&mut self, now: Instant) -> bool {
        self.prune(now);
        if !self.would_allow(now) {
            return false;
        }
        self.accepted.push_back(now);
        true
    }

    /// Drop window entries older than 60s.
    fn prune(&mut self, now: Instant) {
        while let Some(&front) = self.accepted.front() {
            if now.duration_since(front) >= WINDOW {
                self.accepted.pop_front();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_spacing_from_budget() {
        let limiter = ChangeRateLimiter::new(6);
        assert_eq!(limiter.min_spacing(), Duration::from_millis(10_000));
    }

    #[test]
    fn test_spacing_enforced() {
        let base = Instant::now();
        let mut limiter = ChangeRateLimiter::new(6);

        assert!(limiter.try_acquire(base));
        assert!(!limiter.try_acquire(base + Duration::from_secs(5)));
        assert!(!limiter.try_acquire(base + Duration::from_millis(9_999)));
        assert!(limiter.try_acquire(base + Duration::from_secs(10)));
    }

    #[test]
    fn test_window_never_exceeds_budget() {
        let base = Instant::now();
        let mut limiter = ChangeRateLimiter::new(6);

        // Hammer once per second for a minute; only six can land
        let mut accepted = 0;
        for i in 0..60 {
            if limiter.try_acquire(base + Duration::from_secs(i)) {
                accepted += 1;
            }
        }
        assert_eq!(accepted, 6);
    }

    #[test]
    fn test_zero_budget_clamped_to_one() {
        let base = Instant::now();
        let mut limiter = ChangeRateLimiter::new(0);
        assert!(limiter.try_acquire(base));
        assert!(!limiter.try_acquire(base + Duration::from_secs(30)));
    }
}
