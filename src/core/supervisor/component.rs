//! Sub-component contract

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Health as reported by the component itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedHealth {
    Healthy,
    Degraded,
    Unhealthy,
    /// The component considers itself stopped
    Stopped,
}

/// Result of a component's own health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: ReportedHealth,
    pub last_check: DateTime<Utc>,
}

impl HealthReport {
    pub fn new(status: ReportedHealth) -> Self {
        Self {
            status,
            last_check: Utc::now(),
        }
    }

    pub fn healthy() -> Self {
        Self::new(ReportedHealth::Healthy)
    }
}

/// Free-form status exposed by a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub details: HashMap<String, Value>,
}

/// An independently lifecycled unit managed by the supervisor
///
/// Backends of every kind (local engines, cloud APIs, ...) are consumed only
/// through this shape. Errors are returned as `anyhow::Error`; the supervisor
/// wraps them before they reach a caller.
#[async_trait]
pub trait SubComponent: Send + Sync {
    fn name(&self) -> &str;

    async fn start(&self) -> anyhow::Result<()>;

    async fn stop(&self) -> anyhow::Result<()>;

    /// Perform one operation
    async fn execute(&self, operation: &str, params: Value) -> anyhow::Result<Value>;

    fn status(&self) -> ComponentStatus;

    async fn health_check(&self) -> anyhow::Result<HealthReport>;
}
