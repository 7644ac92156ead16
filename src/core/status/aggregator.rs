//! Status aggregator

use super::metrics::{AdapterStats, CoordinatorMetrics, overall_health};
use crate::config::StatusConfig;
use crate::core::supervisor::SubComponentState;
use crate::core::types::{AdapterId, RoutingDecision};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::debug;

#[derive(Debug, Default)]
struct AdapterCounters {
    requests: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    total_duration_ms: AtomicU64,
}

impl AdapterCounters {
    fn stats(&self) -> AdapterStats {
        let requests = self.requests.load(Ordering::Relaxed);
        let total = self.total_duration_ms.load(Ordering::Relaxed);
        AdapterStats {
            requests,
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            avg_duration_ms: if requests == 0 {
                0.0
            } else {
                total as f64 / requests as f64
            },
        }
    }
}

/// Running counters plus the in-memory decision log
///
/// Counters are atomics and safe to update from any number of tasks. The
/// decision log is operational history only and evicts its oldest entry
/// once full.
#[derive(Debug)]
pub struct StatusAggregator {
    started: Instant,
    started_at: DateTime<Utc>,
    total: AtomicU64,
    successful: AtomicU64,
    failed: AtomicU64,
    escalations: AtomicU64,
    per_adapter: DashMap<AdapterId, AdapterCounters>,
    decisions: Mutex<VecDeque<RoutingDecision>>,
    capacity: usize,
}

impl Default for StatusAggregator {
    fn default() -> Self {
        Self::new(&StatusConfig::default())
    }
}

impl StatusAggregator {
    pub fn new(config: &StatusConfig) -> Self {
        let capacity = config.decision_log_capacity.max(1);
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            total: AtomicU64::new(0),
            successful: AtomicU64::new(0),
            failed: AtomicU64::new(0),
            escalations: AtomicU64::new(0),
            per_adapter: DashMap::new(),
            decisions: Mutex::new(VecDeque::with_capacity(capacity.min(1024))),
            capacity,
        }
    }

    /// Append a decision to the log
    pub fn record_decision(&self, decision: RoutingDecision) {
        let mut log = self.decisions.lock();
        if log.len() == self.capacity {
            log.pop_front();
        }
        log.push_back(decision);
    }

    /// Count one dispatched request and log its decision
    pub fn record_outcome(
        &self,
        decision: &RoutingDecision,
        success: bool,
        duration_ms: u64,
        escalated: bool,
    ) {
        self.total.fetch_add(1, Ordering::Relaxed);
        if success {
            self.successful.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        if escalated {
            self.escalations.fetch_add(1, Ordering::Relaxed);
        }

        {
            let counters = self
                .per_adapter
                .entry(decision.selected_adapter_id.clone())
                .or_default();
            counters.requests.fetch_add(1, Ordering::Relaxed);
            if success {
                counters.successes.fetch_add(1, Ordering::Relaxed);
            } else {
                counters.failures.fetch_add(1, Ordering::Relaxed);
            }
            counters
                .total_duration_ms
                .fetch_add(duration_ms, Ordering::Relaxed);
        }

        debug!(
            "Recorded outcome for {} (success: {}, {}ms)",
            decision.selected_adapter_id, success, duration_ms
        );
        self.record_decision(decision.clone());
    }

    /// Most recent decisions, newest first
    pub fn recent_decisions(&self, limit: usize) -> Vec<RoutingDecision> {
        self.decisions
            .lock()
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }

    pub fn decision_count(&self) -> usize {
        self.decisions.lock().len()
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Metrics computed from the counters and the given component states
    pub fn snapshot(&self, states: &[SubComponentState]) -> CoordinatorMetrics {
        let adapters: BTreeMap<_, _> = self
            .per_adapter
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().stats()))
            .collect();

        CoordinatorMetrics {
            total_operations: self.total.load(Ordering::Relaxed),
            successful_operations: self.successful.load(Ordering::Relaxed),
            failed_operations: self.failed.load(Ordering::Relaxed),
            escalations: self.escalations.load(Ordering::Relaxed),
            sub_component_count: states.len(),
            uptime_seconds: self.uptime_seconds(),
            started_at: self.started_at,
            overall_health: overall_health(states),
            adapters,
        }
    }
}
