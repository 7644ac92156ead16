//! Retry, escalation and circuit breaker configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Escalation controller configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    /// Attempts on the primary adapter before escalating
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Fixed pause between attempts, in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
    /// Budget for a single attempt, in milliseconds
    #[serde(default = "default_attempt_timeout_ms")]
    pub attempt_timeout_ms: u64,
    /// Budget for the whole retry and escalation chain, in milliseconds
    #[serde(default = "default_overall_deadline_ms")]
    pub overall_deadline_ms: u64,
    /// Message reported when every attempt failed
    #[serde(default = "default_fallback_message")]
    pub fallback_message: String,
    /// Circuit breaker configuration
    #[serde(default)]
    pub circuit_breaker: CircuitBreakerConfig,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            retry_delay_ms: default_retry_delay_ms(),
            attempt_timeout_ms: default_attempt_timeout_ms(),
            overall_deadline_ms: default_overall_deadline_ms(),
            fallback_message: default_fallback_message(),
            circuit_breaker: CircuitBreakerConfig::default(),
        }
    }
}

impl EscalationConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    pub fn overall_deadline(&self) -> Duration {
        Duration::from_millis(self.overall_deadline_ms)
    }
}

/// Circuit breaker configuration
///
/// The breaker for an adapter opens once at least `min_requests` outcomes
/// were recorded within `window_secs` and the share of failures among them
/// reaches `failure_rate_threshold`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Whether the breaker short-circuits known-bad adapters
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Failure share (0, 1] that opens the breaker
    #[serde(default = "default_failure_rate_threshold")]
    pub failure_rate_threshold: f64,
    /// Minimum outcomes in the window before the rate is considered
    #[serde(default = "default_min_requests")]
    pub min_requests: u32,
    /// Rolling window length in seconds
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,
    /// Seconds the breaker stays open before a half-open trial
    #[serde(default = "default_open_secs")]
    pub open_secs: u64,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            failure_rate_threshold: default_failure_rate_threshold(),
            min_requests: default_min_requests(),
            window_secs: default_window_secs(),
            open_secs: default_open_secs(),
        }
    }
}

impl CircuitBreakerConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn open_duration(&self) -> Duration {
        Duration::from_secs(self.open_secs)
    }

    /// Configuration with the breaker switched off
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}
