//! Echo component

use crate::config::ComponentConfig;
use crate::core::supervisor::{ComponentStatus, HealthReport, ReportedHealth, SubComponent};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EchoOptions {
    /// Artificial latency per operation
    #[serde(default)]
    delay_ms: u64,
}

/// Returns the operation and parameters it was given
///
/// Useful as a stand-in backend and as a minimal fallback creator.
#[derive(Debug)]
pub struct EchoComponent {
    name: String,
    delay: Duration,
    running: AtomicBool,
    calls: AtomicU64,
}

impl EchoComponent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delay: Duration::ZERO,
            running: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn from_config(config: &ComponentConfig) -> anyhow::Result<Self> {
        let options: EchoOptions = if config.options.is_null() {
            EchoOptions::default()
        } else {
            serde_json::from_value(config.options.clone())?
        };
        Ok(Self::new(config.name.clone()).with_delay(Duration::from_millis(options.delay_ms)))
    }
}

#[async_trait]
impl SubComponent for EchoComponent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&self) -> anyhow::Result<()> {
        self.running.store(true, Ordering::Release);
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.running.store(false, Ordering::Release);
        Ok(())
    }

    async fn execute(&self, operation: &str, params: Value) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(json!({
            "component": self.name,
            "operation": operation,
            "params": params,
        }))
    }

    fn status(&self) -> ComponentStatus {
        let running = self.running.load(Ordering::Acquire);
        let mut details = HashMap::new();
        details.insert("calls".to_string(), json!(self.calls.load(Ordering::Relaxed)));
        ComponentStatus {
            name: self.name.clone(),
            status: if running { "running" } else { "stopped" }.to_string(),
            details,
        }
    }

    async fn health_check(&self) -> anyhow::Result<HealthReport> {
        let status = if self.running.load(Ordering::Acquire) {
            ReportedHealth::Healthy
        } else {
            ReportedHealth::Stopped
        };
        Ok(HealthReport::new(status))
    }
}
