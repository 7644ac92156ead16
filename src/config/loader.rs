//! Environment overrides
//!
//! Operational knobs can be overridden per deployment without editing the
//! YAML file. Variables use the `COORDINATOR_` prefix.

use super::Config;
use crate::utils::error::{CoordinatorError, Result};
use std::env;
use std::str::FromStr;
use tracing::debug;

impl Config {
    /// Apply `COORDINATOR_*` environment variables on top of this configuration
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "COORDINATOR_RETRY_COUNT")? {
            self.escalation.retry_count = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_RETRY_DELAY_MS")? {
            self.escalation.retry_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_ATTEMPT_TIMEOUT_MS")? {
            self.escalation.attempt_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_DEADLINE_MS")? {
            self.escalation.overall_deadline_ms = v;
        }
        if let Some(v) = lookup("COORDINATOR_FALLBACK_MESSAGE") {
            self.escalation.fallback_message = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_CIRCUIT_BREAKER")? {
            self.escalation.circuit_breaker.enabled = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_EXECUTE_TIMEOUT_MS")? {
            self.supervisor.execute_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_PROBE_TIMEOUT_MS")? {
            self.supervisor.probe_timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_LOG_LEVEL")? {
            self.logging.level = v;
        }
        if let Some(v) = parse_var(&lookup, "COORDINATOR_LOG_JSON")? {
            self.logging.json = v;
        }

        debug!("Environment overrides applied");
        self.validate()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CoordinatorError::Configuration(format!("Invalid {}: {}", key, e))),
        None => Ok(None),
    }
}
