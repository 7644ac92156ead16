//! Escalation controller
//!
//! Runs one request against its primary adapter with a fixed-delay retry
//! loop, then escalates once to the terminal fallback adapter. Retries and
//! circuit breaking stay inside this module; callers only ever see a success
//! or an exhausted chain.

use super::circuit_breaker::{CircuitBreaker, CircuitBreakerMetrics, CircuitState};
use super::outcome::{AttemptFailure, DispatchOutcome};
use crate::config::EscalationConfig;
use crate::core::registry::AdapterRegistry;
use crate::core::supervisor::Supervisor;
use crate::core::types::{AdapterDescriptor, AdapterId, ClassifiedRequest};
use crate::utils::error::{CoordinatorError, Result};
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, warn};

/// Retry/escalation policy over the supervisor
pub struct EscalationController {
    registry: Arc<AdapterRegistry>,
    supervisor: Arc<Supervisor>,
    config: EscalationConfig,
    breakers: DashMap<AdapterId, Arc<CircuitBreaker>>,
}

impl std::fmt::Debug for EscalationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EscalationController")
            .field("config", &self.config)
            .field("breakers", &self.breakers.len())
            .finish()
    }
}

/// Running state of one `execute_with_fallback` call
struct Chain {
    started: Instant,
    deadline: Instant,
    attempts: u32,
    failures: Vec<AttemptFailure>,
}

impl Chain {
    fn remaining(&self) -> Option<Duration> {
        let left = self.deadline.saturating_duration_since(Instant::now());
        (!left.is_zero()).then_some(left)
    }

    fn finish(
        self,
        adapter: &AdapterDescriptor,
        value: Value,
        escalated: bool,
        short_circuited: bool,
    ) -> DispatchOutcome {
        DispatchOutcome {
            adapter_id: adapter.id.clone(),
            value,
            attempts: self.attempts,
            escalated,
            short_circuited,
            latency_ms: self.started.elapsed().as_millis() as u64,
            failures: self.failures,
        }
    }
}

impl EscalationController {
    pub fn new(
        registry: Arc<AdapterRegistry>,
        supervisor: Arc<Supervisor>,
        config: EscalationConfig,
    ) -> Self {
        Self {
            registry,
            supervisor,
            config,
            breakers: DashMap::new(),
        }
    }

    pub fn config(&self) -> &EscalationConfig {
        &self.config
    }

    /// Execute `request` on `primary_id`, escalating to the fallback adapter
    ///
    /// The primary gets up to `retry_count` attempts with `retry_delay`
    /// between them. If it never succeeds and is not itself the fallback,
    /// the fallback adapter gets exactly one attempt. An open circuit on the
    /// primary skips straight to the fallback. The whole chain is bounded by
    /// the overall deadline.
    ///
    /// Returns `NotFound` for an unregistered primary and
    /// `EscalationExhausted` when every attempt failed.
    pub async fn execute_with_fallback(
        &self,
        request: &ClassifiedRequest,
        primary_id: &str,
    ) -> Result<DispatchOutcome> {
        let primary = self.registry.lookup(primary_id)?;
        let fallback = self.registry.default_fallback()?;
        let operation = request.task_type.as_str();
        let params = request.to_params();

        let started = Instant::now();
        let mut chain = Chain {
            started,
            deadline: started + self.config.overall_deadline(),
            attempts: 0,
            failures: Vec::new(),
        };

        if primary.is_fallback {
            if let Some(value) = self
                .run_attempts(&primary, operation, &params, self.config.retry_count, &mut chain)
                .await
            {
                return Ok(chain.finish(&primary, value, false, false));
            }
            return Err(self.exhausted(chain));
        }

        let breaker = self.breaker_for(&primary.id);
        let short_circuited = breaker.as_ref().is_some_and(|b| !b.allow_request());

        if short_circuited {
            warn!(
                "Circuit open for adapter {}, escalating without retries",
                primary.id
            );
        } else if let Some(value) = self
            .run_attempts(&primary, operation, &params, self.config.retry_count, &mut chain)
            .await
        {
            return Ok(chain.finish(&primary, value, false, false));
        }

        warn!(
            "Escalating request from adapter {} to fallback adapter {}",
            primary.id, fallback.id
        );

        match self.run_attempts(&fallback, operation, &params, 1, &mut chain).await {
            Some(value) => Ok(chain.finish(&fallback, value, true, short_circuited)),
            None => Err(self.exhausted(chain)),
        }
    }

    /// Up to `max_attempts` tries on one adapter; records every failure
    async fn run_attempts(
        &self,
        adapter: &AdapterDescriptor,
        operation: &str,
        params: &Value,
        max_attempts: u32,
        chain: &mut Chain,
    ) -> Option<Value> {
        let breaker = self.breaker_for(&adapter.id);

        for attempt in 1..=max_attempts {
            let Some(remaining) = chain.remaining() else {
                let deadline_ms = self.config.overall_deadline_ms;
                warn!(
                    "Deadline of {}ms reached before attempt {} on adapter {}",
                    deadline_ms, attempt, adapter.id
                );
                chain.failures.push(AttemptFailure::new(
                    &adapter.id,
                    attempt,
                    &CoordinatorError::timeout(&adapter.component, deadline_ms),
                ));
                return None;
            };

            chain.attempts += 1;
            let timeout = self.config.attempt_timeout().min(remaining);
            debug!(
                "Attempt {}/{} on adapter {} (timeout {:?})",
                attempt, max_attempts, adapter.id, timeout
            );

            match self
                .supervisor
                .execute(&adapter.component, operation, params.clone(), Some(timeout))
                .await
            {
                Ok(value) => {
                    if let Some(breaker) = &breaker {
                        breaker.record_success();
                    }
                    return Some(value);
                }
                Err(err) => {
                    if let Some(breaker) = &breaker {
                        breaker.record_failure();
                    }
                    warn!(
                        "Attempt {}/{} on adapter {} failed: {}",
                        attempt, max_attempts, adapter.id, err
                    );
                    let retryable = err.is_retryable();
                    chain.failures.push(AttemptFailure::new(&adapter.id, attempt, &err));

                    if !retryable || attempt == max_attempts {
                        return None;
                    }
                    // an Open circuit ends retries on the primary
                    if !adapter.is_fallback
                        && breaker
                            .as_ref()
                            .is_some_and(|b| b.state() == CircuitState::Open)
                    {
                        warn!(
                            "Circuit opened for adapter {}, abandoning retries",
                            adapter.id
                        );
                        return None;
                    }
                }
            }

            let delay = self.config.retry_delay();
            if !delay.is_zero() {
                match chain.remaining() {
                    Some(remaining) => tokio::time::sleep(delay.min(remaining)).await,
                    None => continue,
                }
            }
        }

        None
    }

    fn exhausted(&self, chain: Chain) -> CoordinatorError {
        error!(
            "Escalation exhausted after {} attempts: {}",
            chain.attempts, self.config.fallback_message
        );
        CoordinatorError::EscalationExhausted {
            message: self.config.fallback_message.clone(),
            chain: chain.failures,
        }
    }

    fn breaker_for(&self, adapter_id: &str) -> Option<Arc<CircuitBreaker>> {
        if !self.config.circuit_breaker.enabled {
            return None;
        }
        Some(
            self.breakers
                .entry(adapter_id.to_string())
                .or_insert_with(|| Arc::new(CircuitBreaker::new(self.config.circuit_breaker.clone())))
                .clone(),
        )
    }

    /// Breaker state of every adapter that has seen traffic
    pub fn circuit_states(&self) -> BTreeMap<AdapterId, CircuitBreakerMetrics> {
        self.breakers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().metrics()))
            .collect()
    }

    /// Close every breaker and forget its history
    pub fn reset_circuits(&self) {
        for entry in self.breakers.iter() {
            entry.value().reset();
        }
    }
}
