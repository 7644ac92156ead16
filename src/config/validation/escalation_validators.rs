//! Escalation, circuit breaker, supervisor and status validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for EscalationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.retry_count == 0 {
            return Err("Retry count must be at least 1".to_string());
        }

        if self.attempt_timeout_ms == 0 {
            return Err("Attempt timeout must be greater than 0".to_string());
        }

        if self.overall_deadline_ms < self.attempt_timeout_ms {
            return Err("Overall deadline must not be shorter than the attempt timeout".to_string());
        }

        if self.fallback_message.trim().is_empty() {
            return Err("Fallback message cannot be empty".to_string());
        }

        self.circuit_breaker.validate()
    }
}

impl Validate for CircuitBreakerConfig {
    fn validate(&self) -> Result<(), String> {
        if !(self.failure_rate_threshold > 0.0 && self.failure_rate_threshold <= 1.0) {
            return Err("Circuit breaker failure rate threshold must be in (0, 1]".to_string());
        }

        if self.min_requests == 0 {
            return Err("Circuit breaker min requests must be greater than 0".to_string());
        }

        if self.window_secs == 0 {
            return Err("Circuit breaker window must be greater than 0".to_string());
        }

        if self.open_secs == 0 {
            return Err("Circuit breaker open duration must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for SupervisorConfig {
    fn validate(&self) -> Result<(), String> {
        if self.execute_timeout_ms == 0 || self.probe_timeout_ms == 0 || self.lifecycle_timeout_ms == 0 {
            return Err("Supervisor timeouts must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for StatusConfig {
    fn validate(&self) -> Result<(), String> {
        if self.decision_log_capacity == 0 {
            return Err("Decision log capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}
