//! Coordinator implementation

use crate::core::escalation::{CircuitBreakerMetrics, DispatchOutcome, EscalationController};
use crate::core::registry::AdapterRegistry;
use crate::core::router::RuleRouter;
use crate::core::status::{CoordinatorMetrics, StatusAggregator, overall_health};
use crate::core::supervisor::{SubComponentState, Supervisor};
use crate::core::types::{
    AdapterDescriptor, AdapterId, ClassifiedRequest, OverallHealth, RoutingDecision,
};
use crate::utils::error::{CoordinatorError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Result of a coordinator-wide health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthCheckReport {
    pub overall_health: OverallHealth,
    pub components: BTreeMap<String, SubComponentState>,
    pub checked_at: DateTime<Utc>,
}

/// Routes requests, executes them on sub-components and reports status
///
/// Owns its registry, supervisor and aggregator; nothing is global. Build one
/// with [`CoordinatorBuilder`](super::CoordinatorBuilder) and share the
/// returned `Arc`.
pub struct Coordinator {
    registry: Arc<AdapterRegistry>,
    router: RuleRouter,
    supervisor: Arc<Supervisor>,
    escalation: EscalationController,
    aggregator: StatusAggregator,
}

impl std::fmt::Debug for Coordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Coordinator")
            .field("registry", &self.registry)
            .field("supervisor", &self.supervisor)
            .finish()
    }
}

impl Coordinator {
    pub(crate) fn new(
        registry: Arc<AdapterRegistry>,
        router: RuleRouter,
        supervisor: Arc<Supervisor>,
        escalation: EscalationController,
        aggregator: StatusAggregator,
    ) -> Self {
        Self {
            registry,
            router,
            supervisor,
            escalation,
            aggregator,
        }
    }

    /// Start every sub-component; failures are returned, not fatal
    pub async fn start(&self) -> Vec<(String, CoordinatorError)> {
        info!("Starting coordinator");
        let failures = self.supervisor.start_all().await;
        for (name, error) in &failures {
            warn!("Component {} unavailable after startup: {}", name, error);
        }
        failures
    }

    /// Stop every sub-component in reverse start order
    pub async fn shutdown(&self) -> Vec<(String, CoordinatorError)> {
        info!("Shutting down coordinator");
        self.supervisor.stop_all().await
    }

    /// Route a request and log the decision
    pub fn route(&self, request: &ClassifiedRequest) -> Result<RoutingDecision> {
        let decision = self.router.route(request)?;
        self.aggregator.record_decision(decision.clone());
        Ok(decision)
    }

    /// Route a request and execute it with retries and escalation
    pub async fn dispatch(&self, request: &ClassifiedRequest) -> Result<DispatchOutcome> {
        let decision = self.router.route(request)?;
        let started = Instant::now();

        let result = self
            .escalation
            .execute_with_fallback(request, &decision.selected_adapter_id)
            .await;
        let duration_ms = started.elapsed().as_millis() as u64;

        let escalated = match &result {
            Ok(outcome) => outcome.escalated,
            Err(CoordinatorError::EscalationExhausted { chain, .. }) => chain
                .iter()
                .any(|f| f.adapter_id != decision.selected_adapter_id),
            Err(_) => false,
        };
        self.aggregator
            .record_outcome(&decision, result.is_ok(), duration_ms, escalated);

        debug!(
            "Dispatched {} via {} in {}ms (success: {})",
            decision.id,
            decision.selected_adapter_id,
            duration_ms,
            result.is_ok()
        );
        result
    }

    /// Metrics from the counters and current component states
    pub fn get_system_status(&self) -> CoordinatorMetrics {
        self.aggregator.snapshot(&self.supervisor.states())
    }

    /// Probe every component and fold the results
    pub async fn health_check(&self) -> HealthCheckReport {
        let components = self.supervisor.health_check_all().await;
        let states: Vec<_> = components.values().cloned().collect();
        HealthCheckReport {
            overall_health: overall_health(&states),
            components,
            checked_at: Utc::now(),
        }
    }

    /// Registered adapters in registration order
    pub fn list_adapters(&self) -> Vec<AdapterDescriptor> {
        self.registry
            .list()
            .iter()
            .map(|a| a.as_ref().clone())
            .collect()
    }

    /// Most recent routing decisions, newest first
    pub fn recent_decisions(&self, limit: usize) -> Vec<RoutingDecision> {
        self.aggregator.recent_decisions(limit)
    }

    pub fn circuit_states(&self) -> BTreeMap<AdapterId, CircuitBreakerMetrics> {
        self.escalation.circuit_states()
    }

    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    pub fn supervisor(&self) -> &Arc<Supervisor> {
        &self.supervisor
    }
}
