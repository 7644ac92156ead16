//! Circuit breaker implementation for adapter fault tolerance

use crate::config::CircuitBreakerConfig;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Circuit is closed, requests flow normally
    Closed,
    /// Circuit is open, requests are rejected
    Open,
    /// Circuit is half-open, one trial request is admitted
    HalfOpen,
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half_open",
        };
        f.write_str(s)
    }
}

/// Circuit breaker metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitBreakerMetrics {
    pub state: CircuitState,
    /// Outcomes currently inside the rolling window
    pub window_requests: u32,
    /// Failures currently inside the rolling window
    pub window_failures: u32,
}

struct BreakerInner {
    state: CircuitState,
    /// (time, success) per recorded outcome, oldest first
    outcomes: VecDeque<(Instant, bool)>,
    opened_at: Option<Instant>,
    trial_started: Option<Instant>,
}

/// Rolling-window circuit breaker
///
/// Opens when the failure rate over the window reaches the threshold with at
/// least `min_requests` outcomes recorded. After `open_duration` one trial
/// request is admitted; its success closes the circuit and its failure opens
/// it again.
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("state", &self.state())
            .finish()
    }
}

impl CircuitBreaker {
    /// Create a new circuit breaker
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                outcomes: VecDeque::new(),
                opened_at: None,
                trial_started: None,
            }),
        }
    }

    /// Check if the circuit breaker allows a request
    pub fn allow_request(&self) -> bool {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        match inner.state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let elapsed = inner
                    .opened_at
                    .map(|t| now.duration_since(t))
                    .unwrap_or_default();
                if elapsed >= self.config.open_duration() {
                    debug!("Circuit breaker transitioning from Open to HalfOpen");
                    inner.state = CircuitState::HalfOpen;
                    inner.trial_started = Some(now);
                    true
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => {
                // A trial whose outcome never came back does not block forever
                let stale = inner
                    .trial_started
                    .is_none_or(|t| now.duration_since(t) >= self.config.open_duration());
                if stale {
                    inner.trial_started = Some(now);
                }
                stale
            }
        }
    }

    /// Handle successful request
    pub fn record_success(&self) {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        if inner.state == CircuitState::HalfOpen {
            debug!("Circuit breaker transitioning from HalfOpen to Closed");
            inner.state = CircuitState::Closed;
            inner.outcomes.clear();
            inner.opened_at = None;
            inner.trial_started = None;
        }

        inner.outcomes.push_back((now, true));
        self.prune(&mut inner, now);
    }

    /// Handle failed request
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock();
        let now = Instant::now();

        inner.outcomes.push_back((now, false));
        self.prune(&mut inner, now);

        match inner.state {
            CircuitState::HalfOpen => {
                debug!("Circuit breaker transitioning from HalfOpen to Open due to failure");
                inner.state = CircuitState::Open;
                inner.opened_at = Some(now);
                inner.trial_started = None;
            }
            CircuitState::Closed => {
                let requests = inner.outcomes.len();
                let failures = inner.outcomes.iter().filter(|(_, ok)| !ok).count();
                if requests >= self.config.min_requests as usize
                    && failures as f64 / requests as f64 >= self.config.failure_rate_threshold
                {
                    warn!(
                        "Circuit breaker opening due to {} failures out of {} requests",
                        failures, requests
                    );
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(now);
                }
            }
            CircuitState::Open => {
                inner.opened_at = Some(now);
            }
        }
    }

    fn prune(&self, inner: &mut BreakerInner, now: Instant) {
        let window = self.config.window();
        while let Some((at, _)) = inner.outcomes.front() {
            if now.duration_since(*at) > window {
                inner.outcomes.pop_front();
            } else {
                break;
            }
        }
    }

    /// Get current circuit breaker state
    pub fn state(&self) -> CircuitState {
        self.inner.lock().state
    }

    /// Get current metrics
    pub fn metrics(&self) -> CircuitBreakerMetrics {
        let mut inner = self.inner.lock();
        self.prune(&mut inner, Instant::now());
        CircuitBreakerMetrics {
            state: inner.state,
            window_requests: inner.outcomes.len() as u32,
            window_failures: inner.outcomes.iter().filter(|(_, ok)| !ok).count() as u32,
        }
    }

    /// Reset the circuit breaker
    pub fn reset(&self) {
        let mut inner = self.inner.lock();
        inner.state = CircuitState::Closed;
        inner.outcomes.clear();
        inner.opened_at = None;
        inner.trial_started = None;
        debug!("Circuit breaker reset");
    }
}
