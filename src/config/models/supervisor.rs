//! Supervisor configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sub-component supervisor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Default budget for `execute` calls, in milliseconds
    #[serde(default = "default_execute_timeout_ms")]
    pub execute_timeout_ms: u64,
    /// Budget for a single health probe, in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
    /// Budget for `start` / `stop` of one component, in milliseconds
    #[serde(default = "default_lifecycle_timeout_ms")]
    pub lifecycle_timeout_ms: u64,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            execute_timeout_ms: default_execute_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
            lifecycle_timeout_ms: default_lifecycle_timeout_ms(),
        }
    }
}

impl SupervisorConfig {
    pub fn execute_timeout(&self) -> Duration {
        Duration::from_millis(self.execute_timeout_ms)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    pub fn lifecycle_timeout(&self) -> Duration {
        Duration::from_millis(self.lifecycle_timeout_ms)
    }
}
