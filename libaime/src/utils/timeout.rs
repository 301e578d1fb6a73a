//! Timeout helpers used across the crate.
//!
//! Protocol code never does its own time arithmetic: frame assembly uses a
//! [`Deadline`] and chip readiness polling uses a [`RetryPolicy`].

use std::time::Duration;

use crate::transport::Clock;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Convert microseconds to Duration.
pub fn us(us: u64) -> Duration {
    Duration::from_micros(us)
}

/// A point on the monotonic microsecond clock after which an operation
/// is abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    expires_at_us: u64,
}

impl Deadline {
    pub fn after(now_us: u64, window: Duration) -> Self {
        let window_us = u64::try_from(window.as_micros()).unwrap_or(u64::MAX);
        Self {
            expires_at_us: now_us.saturating_add(window_us),
        }
    }

    pub fn is_expired(&self, now_us: u64) -> bool {
        now_us > self.expires_at_us
    }

    pub fn expires_at_us(&self) -> u64 {
        self.expires_at_us
    }
}

/// Bounded polling: try `attempts` times, sleeping `interval` between
/// attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub const fn new(attempts: u32, interval: Duration) -> Self {
        Self { attempts, interval }
    }

    /// Run `probe` until it returns true or the attempts run out. Returns
    /// whether the probe succeeded.
    pub fn poll<F>(&self, clock: &mut dyn Clock, mut probe: F) -> bool
    where
        F: FnMut() -> bool,
    {
        for attempt in 0..self.attempts {
            if probe() {
                return true;
            }
            if attempt + 1 < self.attempts {
                clock.sleep(self.interval);
            }
        }
        false
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(20, ms(1))
    }
}
