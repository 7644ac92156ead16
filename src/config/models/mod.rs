//! Configuration data models
//!
//! This module defines all configuration structures used by the coordinator.

pub mod component;
pub mod escalation;
pub mod logging;
pub mod status;
pub mod supervisor;

// Re-export all configuration types
pub use component::*;
pub use escalation::*;
pub use logging::*;
pub use status::*;
pub use supervisor::*;

pub fn default_true() -> bool {
    true
}

/// Attempts on the primary adapter
pub fn default_retry_count() -> u32 {
    3
}

pub fn default_retry_delay_ms() -> u64 {
    1_000
}

pub fn default_attempt_timeout_ms() -> u64 {
    30_000
}

pub fn default_overall_deadline_ms() -> u64 {
    120_000
}

pub fn default_fallback_message() -> String {
    "All adapters failed to handle the request".to_string()
}

pub fn default_failure_rate_threshold() -> f64 {
    0.5
}

pub fn default_min_requests() -> u32 {
    5
}

pub fn default_window_secs() -> u64 {
    60
}

pub fn default_open_secs() -> u64 {
    30
}

pub fn default_execute_timeout_ms() -> u64 {
    30_000
}

pub fn default_probe_timeout_ms() -> u64 {
    5_000
}

pub fn default_lifecycle_timeout_ms() -> u64 {
    10_000
}

pub fn default_decision_log_capacity() -> usize {
    1_000
}
