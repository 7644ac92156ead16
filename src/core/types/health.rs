//! Health check types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Health of a single sub-component
///
/// `Unknown` means the health could not be determined (never probed, not
/// running, or the probe timed out). It is distinct from `Unhealthy`, which
/// is a confirmed bad result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum HealthStatus {
    /// Unknown status
    #[default]
    Unknown = 0,
    /// Healthy
    Healthy = 1,
    /// Degraded service
    Degraded = 2,
    /// Unhealthy
    Unhealthy = 3,
}

impl From<u8> for HealthStatus {
    fn from(value: u8) -> Self {
        match value {
            1 => HealthStatus::Healthy,
            2 => HealthStatus::Degraded,
            3 => HealthStatus::Unhealthy,
            _ => HealthStatus::Unknown,
        }
    }
}

impl From<HealthStatus> for u8 {
    fn from(status: HealthStatus) -> Self {
        status as u8
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Unknown => "unknown",
            HealthStatus::Healthy => "healthy",
            HealthStatus::Degraded => "degraded",
            HealthStatus::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}

/// Last recorded health of a sub-component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Status
    pub status: HealthStatus,
    /// Check time (`None` until the first probe)
    pub checked_at: Option<DateTime<Utc>>,
    /// Probe latency (milliseconds)
    pub latency_ms: Option<u64>,
    /// Error message
    pub error: Option<String>,
}

impl Default for HealthSnapshot {
    fn default() -> Self {
        Self {
            status: HealthStatus::Unknown,
            checked_at: None,
            latency_ms: None,
            error: None,
        }
    }
}

impl HealthSnapshot {
    pub fn new(status: HealthStatus, latency_ms: u64) -> Self {
        Self {
            status,
            checked_at: Some(Utc::now()),
            latency_ms: Some(latency_ms),
            error: None,
        }
    }

    pub fn unhealthy(error: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::new(HealthStatus::Unhealthy, latency_ms)
        }
    }

    pub fn unknown(reason: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            error: Some(reason.into()),
            ..Self::new(HealthStatus::Unknown, latency_ms)
        }
    }
}

/// Coordinator-level health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Degraded,
    Unhealthy,
}

impl fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OverallHealth::Healthy => "healthy",
            OverallHealth::Degraded => "degraded",
            OverallHealth::Unhealthy => "unhealthy",
        };
        f.write_str(s)
    }
}
