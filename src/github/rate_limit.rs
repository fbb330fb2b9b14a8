// src/github/rate_limit.rs
// =============================================================================
// GitHub rate-limit bookkeeping.
//
// Every response from GitHub carries two headers:
//   X-RateLimit-Remaining  how many calls are left in the current window
//   X-RateLimit-Reset      when the window resets (unix epoch seconds)
//
// After each response we look at them. When remaining hits exactly 0 we sleep
// until the reset time plus a 5 second buffer. The response that told us about
// it is still used normally; only the next call benefits from the wait.
//
// Time is read and slept through the Clock trait so tests can check the
// computed wait without actually sleeping.
// =============================================================================

use futures::future::BoxFuture;
use reqwest::header::HeaderMap;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub const REMAINING_HEADER: &str = "x-ratelimit-remaining";
pub const RESET_HEADER: &str = "x-ratelimit-reset";

/// Extra seconds slept past the advertised reset time
pub const RESET_BUFFER_SECS: i64 = 5;

/// Source of "now" and of sleeping
pub trait Clock: Send + Sync {
    /// Current unix time in seconds
    fn now(&self) -> i64;

    fn sleep(&self, duration: Duration) -> BoxFuture<'_, ()>;
}

/// Wall clock + tokio timer
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default()
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'_, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// Quota state read from one response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub remaining: u64,
    /// Unix epoch seconds
    pub reset: i64,
}

impl RateLimit {
    /// Reads the headers, defaulting remaining to 1 and reset to `now`
    /// when a header is missing or unparsable.
    pub fn from_headers(headers: &HeaderMap, now: i64) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(|v| v.trim().to_string())
        };

        let remaining = read(REMAINING_HEADER)
            .and_then(|v| v.parse().ok())
            .unwrap_or(1);
        let reset = read(RESET_HEADER)
            .and_then(|v| v.parse().ok())
            .unwrap_or(now);

        RateLimit { remaining, reset }
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// How long to wait before the next call, `None` while quota is left.
    ///
    /// A reset time far enough in the past yields a zero wait.
    pub fn backoff(&self, now: i64) -> Option<Duration> {
        if !self.is_exhausted() {
            return None;
        }
        let secs = self
            .reset
            .saturating_sub(now)
            .saturating_add(RESET_BUFFER_SECS)
            .max(0);
        Some(Duration::from_secs(secs as u64))
    }
}

#[cfg(test)]
pub use fake::FakeClock;

#[cfg(test)]
mod fake {
    use super::Clock;
    use futures::future::BoxFuture;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Frozen clock that records requested sleeps instead of sleeping
    #[derive(Debug)]
    pub struct FakeClock {
        now: i64,
        sleeps: Mutex<Vec<Duration>>,
    }

    impl FakeClock {
        pub fn at(now: i64) -> Self {
            FakeClock {
                now,
                sleeps: Mutex::new(Vec::new()),
            }
        }

        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.lock().unwrap().clone()
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> i64 {
            self.now
        }

        fn sleep(&self, duration: Duration) -> BoxFuture<'_, ()> {
            self.sleeps.lock().unwrap().push(duration);
            Box::pin(async {})
        }
    }
}
