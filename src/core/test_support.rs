//! Scriptable sub-components for unit tests

use crate::core::supervisor::{ComponentStatus, HealthReport, ReportedHealth, SubComponent};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeBehavior {
    Report(ReportedHealth),
    Fail,
    Hang,
}

/// A component whose behaviour each test sets up
pub struct ScriptedComponent {
    name: String,
    fail_start: AtomicBool,
    fail_execute: AtomicBool,
    execute_delay: Mutex<Option<Duration>>,
    lifecycle_delay: Mutex<Option<Duration>>,
    probe: Mutex<ProbeBehavior>,
    pub calls: AtomicU32,
    pub starts: AtomicU32,
    pub stops: AtomicU32,
    pub stop_log: Option<std::sync::Arc<Mutex<Vec<String>>>>,
}

impl ScriptedComponent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail_start: AtomicBool::new(false),
            fail_execute: AtomicBool::new(false),
            execute_delay: Mutex::new(None),
            lifecycle_delay: Mutex::new(None),
            probe: Mutex::new(ProbeBehavior::Report(ReportedHealth::Healthy)),
            calls: AtomicU32::new(0),
            starts: AtomicU32::new(0),
            stops: AtomicU32::new(0),
            stop_log: None,
        }
    }

    pub fn failing(name: &str) -> Self {
        let component = Self::new(name);
        component.fail_execute.store(true, Ordering::SeqCst);
        component
    }

    pub fn failing_start(self) -> Self {
        self.fail_start.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        *self.execute_delay.lock() = Some(delay);
        self
    }

    /// Delay applied to both `start` and `stop`
    pub fn with_lifecycle_delay(self, delay: Duration) -> Self {
        *self.lifecycle_delay.lock() = Some(delay);
        self
    }

    pub fn with_probe(self, probe: ProbeBehavior) -> Self {
        *self.probe.lock() = probe;
        self
    }

    pub fn with_stop_log(mut self, log: std::sync::Arc<Mutex<Vec<String>>>) -> Self {
        self.stop_log = Some(log);
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_execute.store(failing, Ordering::SeqCst);
    }

    pub fn set_probe(&self, probe: ProbeBehavior) {
        *self.probe.lock() = probe;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    async fn lifecycle_pause(&self) {
        let delay = *self.lifecycle_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl SubComponent for ScriptedComponent {
    fn name(&self) -> &str {
        &self.name
    }

    async fn start(&self) -> anyhow::Result<()> {
        self.starts.fetch_add(1, Ordering::SeqCst);
        self.lifecycle_pause().await;
        if self.fail_start.load(Ordering::SeqCst) {
            anyhow::bail!("{} refused to start", self.name);
        }
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        self.lifecycle_pause().await;
        if let Some(log) = &self.stop_log {
            log.lock().push(self.name.clone());
        }
        Ok(())
    }

    async fn execute(&self, operation: &str, params: Value) -> anyhow::Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.execute_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_execute.load(Ordering::SeqCst) {
            anyhow::bail!("{} failed on {}", self.name, operation);
        }
        Ok(json!({ "served_by": self.name, "operation": operation, "params": params }))
    }

    fn status(&self) -> ComponentStatus {
        ComponentStatus {
            name: self.name.clone(),
            status: "scripted".to_string(),
            details: HashMap::new(),
        }
    }

    async fn health_check(&self) -> anyhow::Result<HealthReport> {
        let probe = *self.probe.lock();
        match probe {
            ProbeBehavior::Report(status) => Ok(HealthReport::new(status)),
            ProbeBehavior::Fail => anyhow::bail!("{} probe crashed", self.name),
            ProbeBehavior::Hang => std::future::pending().await,
        }
    }
}
