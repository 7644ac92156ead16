//! Test sub-components

use async_trait::async_trait;
use mcp_coordinator::{ComponentStatus, HealthReport, ReportedHealth, SubComponent};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

/// How a component answers health probes
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Probe {
    Healthy,
    Degraded,
    Error,
    Hang,
}

/// A component that counts calls and fails on demand
pub struct TestComponent {
    name: String,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    probe: Mutex<Probe>,
    calls: AtomicU32,
}

impl TestComponent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            failing: AtomicBool::new(false),
            delay: Mutex::new(None),
            probe: Mutex::new(Probe::Healthy),
            calls: AtomicU32::new(0),
        }
    }

    pub fn failing(name: &str) -> Self {
        let component = Self::new(name);
        component.set_failing(true);
        component
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn set_probe(&self, probe: Probe) {
        *self.probe.lock() = probe;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubComponent for TestComponent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn execute(&self, operation: &str, params: Value) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("{} is failing", self.name);
        }
        Ok(json!({ "handled_by": self.name, "operation": operation, "params": params }))
    }

    fn status(&self) -> ComponentStatus {
        ComponentStatus {
            name: self.name.clone(),
            status: "test".to_string(),
            details: HashMap::new(),
        }
    }

    async fn health_check(&self) -> anyhow::Result<HealthReport> {
        let probe = *self.probe.lock();
        match probe {
            Probe::Healthy => Ok(HealthReport::healthy()),
            Probe::Degraded => Ok(HealthReport::new(ReportedHealth::Degraded)),
            Probe::Error => anyhow::bail!("{} probe failed", self.name),
            Probe::Hang => std::future::pending().await,
        }
    }
}
