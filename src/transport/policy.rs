//! Retry policy: which failures are worth another attempt, and how long to
//! wait before it.

use std::time::Duration;

use rand::Rng;

use crate::config::ClientConfig;
use crate::error::Error;

/// What to do after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decision {
    Retry { delay: Duration },
    Fail,
}

/// Deterministic retry/backoff engine shared by both execution modes.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub jitter: bool,
}

impl RetryPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            base_delay: config.base_delay,
            max_delay: config.max_delay,
            jitter: config.jitter,
        }
    }

    /// Decide what to do after `attempt` (0-based) failed with `err`.
    ///
    /// Non-transient failures always fail immediately; transient ones retry
    /// until the total attempt budget is spent.
    pub(crate) fn decide(&self, err: &Error, attempt: u32) -> Decision {
        if !err.is_transient() {
            return Decision::Fail;
        }
        if attempt + 1 >= self.max_attempts {
            return Decision::Fail;
        }
        Decision::Retry {
            delay: self.backoff_delay(attempt),
        }
    }

    /// Exponential backoff: `base * 2^attempt`, capped at `max_delay`.
    /// With jitter enabled the delay is drawn from `[delay/2, delay]`.
    pub(crate) fn backoff_delay(&self, attempt: u32) -> Duration {
        let base = self.base_delay.as_millis() as u64;
        let cap = self.max_delay.as_millis() as u64;
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay = base.saturating_mul(factor).min(cap);

        if self.jitter && delay > 0 {
            let low = delay / 2;
            let jittered = rand::thread_rng().gen_range(low..=delay);
            Duration::from_millis(jittered)
        } else {
            Duration::from_millis(delay)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(1_000),
            jitter: false,
        }
    }

    #[test]
    fn backoff_is_non_decreasing_and_capped() {
        let p = policy(10);
        let mut previous = Duration::ZERO;
        for attempt in 0..12 {
            let delay = p.backoff_delay(attempt);
            assert!(delay >= previous, "delay shrank at attempt {}", attempt);
            assert!(delay <= p.max_delay);
            previous = delay;
        }
        assert_eq!(p.backoff_delay(0), Duration::from_millis(100));
        assert_eq!(p.backoff_delay(1), Duration::from_millis(200));
        assert_eq!(p.backoff_delay(6), Duration::from_millis(1_000));
    }

    #[test]
    fn jittered_backoff_stays_within_bounds() {
        let p = RetryPolicy {
            jitter: true,
            ..policy(5)
        };
        for attempt in 0..8 {
            let full = policy(5).backoff_delay(attempt);
            let jittered = p.backoff_delay(attempt);
            assert!(jittered >= full / 2);
            assert!(jittered <= full);
        }
    }

    #[test]
    fn transient_errors_retry_until_budget_spent() {
        let p = policy(3);
        let err = Error::from_status(500, "boom");
        assert!(matches!(p.decide(&err, 0), Decision::Retry { .. }));
        assert!(matches!(p.decide(&err, 1), Decision::Retry { .. }));
        assert_eq!(p.decide(&err, 2), Decision::Fail);
    }

    #[test]
    fn non_transient_errors_never_retry() {
        let p = policy(5);
        assert_eq!(p.decide(&Error::from_status(400, "bad"), 0), Decision::Fail);
        assert_eq!(
            p.decide(&Error::from_status(404, "missing"), 0),
            Decision::Fail
        );
        assert_eq!(p.decide(&Error::streaming("broken"), 0), Decision::Fail);
    }

    #[test]
    fn single_attempt_budget_never_retries() {
        let p = policy(1);
        let err = Error::from_status(503, "busy");
        assert_eq!(p.decide(&err, 0), Decision::Fail);
    }
}
