//! Metrics snapshot types

use crate::core::supervisor::{LifecycleState, SubComponentState};
use crate::core::types::{AdapterId, HealthStatus, OverallHealth};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-adapter dispatch statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdapterStats {
    pub requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub avg_duration_ms: f64,
}

/// Coordinator-wide metrics, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoordinatorMetrics {
    pub total_operations: u64,
    pub successful_operations: u64,
    pub failed_operations: u64,
    /// Dispatches served by the fallback after the primary gave up
    pub escalations: u64,
    pub sub_component_count: usize,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
    pub overall_health: OverallHealth,
    /// Keyed by the routed adapter
    pub adapters: BTreeMap<AdapterId, AdapterStats>,
}

/// Fold component states into one health value
///
/// A component counts as bad when its last health is Unhealthy or its
/// lifecycle is Failed. More than half bad is unhealthy; any bad component,
/// or any Degraded or Unknown one, is degraded. No components at all is
/// unhealthy.
pub fn overall_health(states: &[SubComponentState]) -> OverallHealth {
    if states.is_empty() {
        return OverallHealth::Unhealthy;
    }

    let bad = states
        .iter()
        .filter(|s| {
            s.last_health.status == HealthStatus::Unhealthy || s.lifecycle == LifecycleState::Failed
        })
        .count();

    if bad * 2 > states.len() {
        return OverallHealth::Unhealthy;
    }

    let uncertain = states.iter().any(|s| {
        matches!(
            s.last_health.status,
            HealthStatus::Degraded | HealthStatus::Unknown
        )
    });

    if bad > 0 || uncertain {
        OverallHealth::Degraded
    } else {
        OverallHealth::Healthy
    }
}
