//! Fixed-window rate limiting for the token endpoint.
//!
//! A single bucket is shared by every caller: at most `permit_limit` requests
//! are admitted per window, and anything beyond that is rejected immediately
//! (no queueing). Windows are anchored at limiter creation and advance in whole
//! multiples of the window length, so they line up with fixed intervals rather
//! than with the first request after a quiet period.
//!
//! The bucket is deliberately not per-client or per-origin. A caller that knows
//! the client header and an allowed origin can spend the whole budget and lock
//! out everyone else until the window rolls over.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Time source for window accounting.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// System clock implementation using `Instant::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Outcome of an admission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted { remaining: u32 },
    Rejected { retry_after: Duration },
}

impl Admission {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted { .. })
    }
}

struct Window {
    started: Instant,
    count: u32,
}

/// Single-bucket fixed-window limiter.
pub struct FixedWindowLimiter {
    permit_limit: u32,
    window: Duration,
    state: Mutex<Window>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
    pub fn new(permit_limit: u32, window: Duration) -> Self {
        Self::with_clock(permit_limit, window, Arc::new(SystemClock))
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.permit_limit, Duration::from_secs(config.window_secs))
    }

    pub fn with_clock(permit_limit: u32, window: Duration, clock: Arc<dyn Clock>) -> Self {
        let started = clock.now();
        Self {
            permit_limit,
            window,
            state: Mutex::new(Window { started, count: 0 }),
            clock,
        }
    }

    /// Check the current window and consume one permit if available.
    pub fn try_acquire(&self) -> Admission {
        let now = self.clock.now();
        // The window is only ever replaced wholesale, so a poisoned lock still
        // holds a consistent value.
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let elapsed = now.saturating_duration_since(state.started);
        if elapsed >= self.window {
            let windows_passed = elapsed.as_nanos() / self.window.as_nanos().max(1);
            let advance = self.window.as_nanos() * windows_passed;
            state.started += Duration::from_nanos(advance as u64);
            state.count = 0;
        }

        if state.count < self.permit_limit {
            state.count += 1;
            Admission::Admitted {
                remaining: self.permit_limit - state.count,
            }
        } else {
            let window_end = state.started + self.window;
            Admission::Rejected {
                retry_after: window_end.saturating_duration_since(now),
            }
        }
    }

    pub fn permit_limit(&self) -> u32 {
        self.permit_limit
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}

impl std::fmt::Debug for FixedWindowLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedWindowLimiter")
            .field("permit_limit", &self.permit_limit)
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Clock that only moves when told to.
    #[derive(Debug, Clone)]
    pub(crate) struct MockClock {
        current_time: Arc<Mutex<Instant>>,
    }

    impl MockClock {
        pub(crate) fn new(start: Instant) -> Self {
            Self {
                current_time: Arc::new(Mutex::new(start)),
            }
        }

        pub(crate) fn advance(&self, duration: Duration) {
            *self.current_time.lock().unwrap() += duration;
        }
    }

    impl Clock for MockClock {
        fn now(&self) -> Instant {
            *self.current_time.lock().unwrap()
        }
    }

    fn limiter(limit: u32, window: Duration) -> (FixedWindowLimiter, MockClock) {
        let clock = MockClock::new(Instant::now());
        let limiter = FixedWindowLimiter::with_clock(limit, window, Arc::new(clock.clone()));
        (limiter, clock)
    }

    #[test]
    fn test_rejects_after_limit_within_window() {
        let (limiter, clock) = limiter(2, Duration::from_secs(60));

        assert_eq!(limiter.try_acquire(), Admission::Admitted { remaining: 1 });
        clock.advance(Duration::from_secs(10));
        assert_eq!(limiter.try_acquire(), Admission::Admitted { remaining: 0 });
        clock.advance(Duration::from_secs(10));
        assert_eq!(
            limiter.try_acquire(),
            Admission::Rejected {
                retry_after: Duration::from_secs(40)
            }
        );
    }

    #[test]
    fn test_resets_when_window_elapses() {
        let (limiter, clock) = limiter(1, Duration::from_secs(60));

        assert!(limiter.try_acquire().is_admitted());
        assert!(!limiter.try_acquire().is_admitted());

        clock.advance(Duration::from_secs(60));
        assert!(limiter.try_acquire().is_admitted());
        assert!(!limiter.try_acquire().is_admitted());
    }

    #[test]
    fn test_windows_stay_aligned_after_idle_period() {
        let (limiter, clock) = limiter(1, Duration::from_secs(60));

        assert!(limiter.try_acquire().is_admitted());
        // Idle for 2.5 windows: the current window began 30s ago.
        clock.advance(Duration::from_secs(150));
        assert!(limiter.try_acquire().is_admitted());
        assert_eq!(
            limiter.try_acquire(),
            Admission::Rejected {
                retry_after: Duration::from_secs(30)
            }
        );

        clock.advance(Duration::from_secs(30));
        assert!(limiter.try_acquire().is_admitted());
    }

    #[test]
    fn test_concurrent_acquire_never_exceeds_limit() {
        let limiter = Arc::new(FixedWindowLimiter::new(50, Duration::from_secs(3600)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || {
                    (0..20).filter(|_| limiter.try_acquire().is_admitted()).count()
                })
            })
            .collect();

        let admitted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(admitted, 50);
    }
}
