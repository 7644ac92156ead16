//! Supervisor implementation

use super::component::{ReportedHealth, SubComponent};
use super::state::{LifecycleState, ManagedComponent, SubComponentState};
use crate::config::SupervisorConfig;
use crate::core::types::{HealthSnapshot, HealthStatus};
use crate::utils::error::{CoordinatorError, Result};
use dashmap::DashMap;
use futures::future::join_all;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Owns the lifecycle, counters and health of a set of named sub-components
pub struct Supervisor {
    components: DashMap<String, Arc<ManagedComponent>>,
    /// Registration order; start follows it, stop reverses it
    order: RwLock<Vec<String>>,
    config: SupervisorConfig,
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("components", &*self.order.read())
            .field("config", &self.config)
            .finish()
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new(SupervisorConfig::default())
    }
}

impl Supervisor {
    pub fn new(config: SupervisorConfig) -> Self {
        Self {
            components: DashMap::new(),
            order: RwLock::new(Vec::new()),
            config,
        }
    }

    pub fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    /// Register a component; it starts out Stopped
    pub fn register(&self, component: Arc<dyn SubComponent>) -> Result<()> {
        let name = component.name().to_string();
        let mut order = self.order.write();

        if self.components.contains_key(&name) {
            return Err(CoordinatorError::configuration(format!(
                "Component {} is already registered",
                name
            )));
        }

        debug!("Registering component {}", name);
        self.components
            .insert(name.clone(), Arc::new(ManagedComponent::new(component)));
        order.push(name);
        Ok(())
    }

    fn entry(&self, name: &str) -> Result<Arc<ManagedComponent>> {
        self.components
            .get(name)
            .map(|e| e.value().clone())
            .ok_or_else(|| CoordinatorError::unknown_component(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Component names in registration order
    pub fn names(&self) -> Vec<String> {
        self.order.read().clone()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn lifecycle(&self, name: &str) -> Result<LifecycleState> {
        Ok(self.entry(name)?.lifecycle())
    }

    /// Start one component
    ///
    /// Starting a Running (or Starting) component is a no-op. A component
    /// that is still stopping cannot be started until its stop completes.
    /// A start error or timeout leaves the component Failed.
    pub async fn start(&self, name: &str) -> Result<()> {
        let managed = self.entry(name)?;

        let current = managed.lifecycle();
        match current {
            LifecycleState::Running | LifecycleState::Starting => return Ok(()),
            LifecycleState::Stopping => {
                return Err(CoordinatorError::ComponentNotRunning {
                    component: name.to_string(),
                    state: current,
                });
            }
            LifecycleState::Stopped | LifecycleState::Failed => {}
        }
        if !managed.transition(current, LifecycleState::Starting) {
            debug!("Component {} changed state concurrently, skipping start", name);
            return Ok(());
        }

        let timeout = self.config.lifecycle_timeout();
        match tokio::time::timeout(timeout, managed.component.start()).await {
            Ok(Ok(())) => {
                managed.set_lifecycle(LifecycleState::Running);
                info!("Component {} started", name);
                Ok(())
            }
            Ok(Err(e)) => {
                managed.set_lifecycle(LifecycleState::Failed);
                error!("Component {} failed to start: {}", name, e);
                Err(CoordinatorError::execution(name, e))
            }
            Err(_) => {
                managed.set_lifecycle(LifecycleState::Failed);
                error!("Component {} did not start within {:?}", name, timeout);
                Err(CoordinatorError::timeout(name, timeout.as_millis() as u64))
            }
        }
    }

    /// Stop one component
    ///
    /// Stopping a Stopped (or Stopping) component is a no-op. A component
    /// that is still starting cannot be stopped until its start completes.
    /// A stop error or timeout leaves the component Failed.
    pub async fn stop(&self, name: &str) -> Result<()> {
        let managed = self.entry(name)?;

        let current = managed.lifecycle();
        match current {
            LifecycleState::Stopped | LifecycleState::Stopping => return Ok(()),
            LifecycleState::Starting => {
                return Err(CoordinatorError::ComponentNotRunning {
                    component: name.to_string(),
                    state: current,
                });
            }
            LifecycleState::Running | LifecycleState::Failed => {}
        }
        if !managed.transition(current, LifecycleState::Stopping) {
            debug!("Component {} changed state concurrently, skipping stop", name);
            return Ok(());
        }

        let timeout = self.config.lifecycle_timeout();
        match tokio::time::timeout(timeout, managed.component.stop()).await {
            Ok(Ok(())) => {
                managed.set_lifecycle(LifecycleState::Stopped);
                info!("Component {} stopped", name);
                Ok(())
            }
            Ok(Err(e)) => {
                managed.set_lifecycle(LifecycleState::Failed);
                error!("Component {} failed to stop: {}", name, e);
                Err(CoordinatorError::execution(name, e))
            }
            Err(_) => {
                managed.set_lifecycle(LifecycleState::Failed);
                error!("Component {} did not stop within {:?}", name, timeout);
                Err(CoordinatorError::timeout(name, timeout.as_millis() as u64))
            }
        }
    }

    /// Start every component in registration order
    ///
    /// A failing component is logged and left Failed; the rest still start.
    /// Returns the failures.
    pub async fn start_all(&self) -> Vec<(String, CoordinatorError)> {
        let mut failures = Vec::new();
        for name in self.names() {
            if let Err(e) = self.start(&name).await {
                failures.push((name, e));
            }
        }

        if failures.is_empty() {
            info!("All {} components started", self.len());
        } else {
            warn!(
                "{} of {} components failed to start",
                failures.len(),
                self.len()
            );
        }
        failures
    }

    /// Stop every component in reverse registration order
    pub async fn stop_all(&self) -> Vec<(String, CoordinatorError)> {
        let mut failures = Vec::new();
        for name in self.names().into_iter().rev() {
            if let Err(e) = self.stop(&name).await {
                failures.push((name, e));
            }
        }

        info!(
            "Stopped components ({} failures)",
            failures.len()
        );
        failures
    }

    /// Execute an operation on a Running component
    ///
    /// `timeout` defaults to the configured execute timeout. A timeout counts
    /// as a failed operation, exactly like an error from the component.
    pub async fn execute(
        &self,
        name: &str,
        operation: &str,
        params: Value,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let managed = self.entry(name)?;

        let state = managed.lifecycle();
        if state != LifecycleState::Running {
            return Err(CoordinatorError::ComponentNotRunning {
                component: name.to_string(),
                state,
            });
        }

        let timeout = timeout.unwrap_or_else(|| self.config.execute_timeout());
        match tokio::time::timeout(timeout, managed.component.execute(operation, params)).await {
            Ok(Ok(value)) => {
                managed.record_success();
                Ok(value)
            }
            Ok(Err(e)) => {
                managed.record_failure();
                debug!("Component {} failed on {}: {}", name, operation, e);
                Err(CoordinatorError::execution(name, e))
            }
            Err(_) => {
                managed.record_failure();
                debug!("Component {} timed out on {}", name, operation);
                Err(CoordinatorError::timeout(name, timeout.as_millis() as u64))
            }
        }
    }

    /// Probe one component and record the result
    pub async fn health_check(&self, name: &str) -> Result<SubComponentState> {
        let managed = self.entry(name)?;
        Ok(self.probe(name, &managed).await)
    }

    /// Probe every component concurrently
    ///
    /// Each probe has its own timeout, so a hung component delays the result
    /// by at most the probe timeout and is recorded Unknown.
    pub async fn health_check_all(&self) -> BTreeMap<String, SubComponentState> {
        let entries: Vec<(String, Arc<ManagedComponent>)> = self
            .names()
            .into_iter()
            .filter_map(|name| self.entry(&name).ok().map(|managed| (name, managed)))
            .collect();

        let probes = entries
            .iter()
            .map(|(name, managed)| self.probe(name, managed));

        join_all(probes)
            .await
            .into_iter()
            .map(|state| (state.name.clone(), state))
            .collect()
    }

    async fn probe(&self, name: &str, managed: &ManagedComponent) -> SubComponentState {
        let state = managed.lifecycle();
        if state != LifecycleState::Running {
            managed.set_health(HealthSnapshot::unknown(
                format!("component is {}", state),
                0,
            ));
            return managed.snapshot(name);
        }

        let timeout = self.config.probe_timeout();
        let started = Instant::now();
        let result = tokio::time::timeout(timeout, managed.component.health_check()).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        let snapshot = match result {
            Ok(Ok(report)) => match report.status {
                ReportedHealth::Healthy => HealthSnapshot::new(HealthStatus::Healthy, latency_ms),
                ReportedHealth::Degraded => HealthSnapshot::new(HealthStatus::Degraded, latency_ms),
                ReportedHealth::Unhealthy => {
                    HealthSnapshot::new(HealthStatus::Unhealthy, latency_ms)
                }
                ReportedHealth::Stopped => {
                    HealthSnapshot::unhealthy("component reports stopped", latency_ms)
                }
            },
            Ok(Err(e)) => {
                warn!("Health check for {} failed: {}", name, e);
                HealthSnapshot::unhealthy(e.to_string(), latency_ms)
            }
            Err(_) => {
                warn!("Health check for {} timed out after {:?}", name, timeout);
                HealthSnapshot::unknown(
                    format!("health probe timed out after {}ms", timeout.as_millis()),
                    latency_ms,
                )
            }
        };

        managed.set_health(snapshot);
        managed.snapshot(name)
    }

    /// Current state of every component without probing, in registration order
    pub fn states(&self) -> Vec<SubComponentState> {
        self.names()
            .iter()
            .filter_map(|name| self.entry(name).ok().map(|m| m.snapshot(name)))
            .collect()
    }
}
