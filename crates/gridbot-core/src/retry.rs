//! Bounded retry policy
//!
//! Explicit retry model for best-effort operations against the external
//! collaborator: a fixed attempt cap with a delay that grows by a
//! multiplier per attempt, instead of ad hoc nested timeouts.

use std::time::Duration;

/// Bounded backoff: `max_attempts` tries, attempt `n` (1-based) preceded
/// by `base_delay * multiplier^(n-1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts before giving up
    pub max_attempts: u32,
    /// Delay before the first retry
    pub base_delay: Duration,
    /// Growth factor applied per attempt
    pub multiplier: f64,
}

impl RetryPolicy {
    /// Delay to wait before attempt `attempt` (1-based). Attempt 1 has no
    /// delay.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.powi(attempt.saturating_sub(2) as i32);
        self.base_delay.mul_f64(factor)
    }
}

impl Default for RetryPolicy {
    /// Three attempts with linearly increasing delay (1s, 2s), matching
    /// the selection verification loop this policy was modeled on.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_has_no_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_before(1), Duration::ZERO);
    }

    #[test]
    fn delays_grow_by_multiplier() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            multiplier: 2.0,
        };
        assert_eq!(policy.delay_before(2), Duration::from_millis(100));
        assert_eq!(policy.delay_before(3), Duration::from_millis(200));
        assert_eq!(policy.delay_before(4), Duration::from_millis(400));
    }
}
