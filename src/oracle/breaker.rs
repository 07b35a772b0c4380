//! Cooldown circuit breaker for the remote move source.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument, warn};

/// Default cooldown after a rate limit.
pub const DEFAULT_COOLDOWN: Duration = Duration::from_secs(60);

/// Where the breaker stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    /// No cooldown recorded; remote calls go ahead.
    Closed,
    /// Cooling down; remote calls are skipped until `until`.
    Open {
        /// End of the cooldown window.
        until: Instant,
    },
    /// The cooldown expired but no remote call has succeeded since. The next
    /// call is attempted.
    HalfOpen,
}

/// Tracks a single cooldown expiry.
///
/// Shared by every clone of the oracle. Concurrent callers race on a plain
/// compare-and-set of the expiry; the last write wins, which is fine at the
/// granularity of one cooldown window.
#[derive(Debug)]
pub struct CooldownBreaker {
    window: Duration,
    expiry: Mutex<Option<Instant>>,
}

impl CooldownBreaker {
    /// Creates a closed breaker with the given cooldown window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            expiry: Mutex::new(None),
        }
    }

    /// Cooldown window length.
    pub fn window(&self) -> Duration {
        self.window
    }

    fn expiry(&self) -> std::sync::MutexGuard<'_, Option<Instant>> {
        self.expiry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// State at `now`.
    pub fn state(&self, now: Instant) -> BreakerState {
        match *self.expiry() {
            None => BreakerState::Closed,
            Some(until) if now < until => BreakerState::Open { until },
            Some(_) => BreakerState::HalfOpen,
        }
    }

    /// True unless the breaker is open.
    pub fn allows_remote(&self, now: Instant) -> bool {
        !matches!(self.state(now), BreakerState::Open { .. })
    }

    /// Opens the breaker for one window starting at `now`.
    ///
    /// An open breaker is left as it is. Returns true if this call armed it.
    #[instrument(skip(self))]
    pub fn trip(&self, now: Instant) -> bool {
        let mut expiry = self.expiry();
        if matches!(*expiry, Some(until) if now < until) {
            debug!("Cooldown already active");
            return false;
        }
        *expiry = Some(now + self.window);
        warn!(
            cooldown_secs = self.window.as_secs(),
            "Remote move source rate limited, cooling down"
        );
        true
    }

    /// Closes a half-open breaker after a successful remote call.
    pub fn record_success(&self, now: Instant) {
        let mut expiry = self.expiry();
        if matches!(*expiry, Some(until) if now >= until) {
            debug!("Remote move source recovered");
            *expiry = None;
        }
    }
}

impl Default for CooldownBreaker {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle() {
        let breaker = CooldownBreaker::new(Duration::from_secs(60));
        let t0 = Instant::now();
        assert_eq!(breaker.state(t0), BreakerState::Closed);

        assert!(breaker.trip(t0));
        let until = t0 + Duration::from_secs(60);
        assert_eq!(breaker.state(t0), BreakerState::Open { until });
        assert!(!breaker.allows_remote(t0 + Duration::from_secs(59)));

        let later = t0 + Duration::from_secs(61);
        assert_eq!(breaker.state(later), BreakerState::HalfOpen);
        assert!(breaker.allows_remote(later));

        breaker.record_success(later);
        assert_eq!(breaker.state(later), BreakerState::Closed);
    }

    #[test]
    fn test_trip_does_not_extend_open_window() {
        let breaker = CooldownBreaker::new(Duration::from_secs(60));
        let t0 = Instant::now();
        assert!(breaker.trip(t0));
        assert!(!breaker.trip(t0 + Duration::from_secs(30)));
        assert_eq!(
            breaker.state(t0 + Duration::from_secs(30)),
            BreakerState::Open {
                until: t0 + Duration::from_secs(60)
            }
        );
    }

    #[test]
    fn test_half_open_rate_limit_reopens() {
        let breaker = CooldownBreaker::new(Duration::from_secs(10));
        let t0 = Instant::now();
        breaker.trip(t0);
        let t1 = t0 + Duration::from_secs(11);
        assert!(breaker.trip(t1));
        assert_eq!(
            breaker.state(t1),
            BreakerState::Open {
                until: t1 + Duration::from_secs(10)
            }
        );
    }

    #[test]
    fn test_success_while_open_keeps_cooldown() {
        let breaker = CooldownBreaker::new(Duration::from_secs(10));
        let t0 = Instant::now();
        breaker.trip(t0);
        breaker.record_success(t0 + Duration::from_secs(1));
        assert!(!breaker.allows_remote(t0 + Duration::from_secs(1)));
    }
}
