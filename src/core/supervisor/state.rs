//! Per-component lifecycle state and counters

use super::component::SubComponent;
use crate::core::types::HealthSnapshot;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

/// Lifecycle of a sub-component
///
/// Maps to AtomicU8 values so state reads never take a lock:
/// - 0 = Stopped
/// - 1 = Starting
/// - 2 = Running
/// - 3 = Stopping
/// - 4 = Failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum LifecycleState {
    #[default]
    Stopped = 0,
    Starting = 1,
    Running = 2,
    Stopping = 3,
    Failed = 4,
}

impl From<u8> for LifecycleState {
    fn from(value: u8) -> Self {
        match value {
            1 => LifecycleState::Starting,
            2 => LifecycleState::Running,
            3 => LifecycleState::Stopping,
            4 => LifecycleState::Failed,
            _ => LifecycleState::Stopped,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LifecycleState::Stopped => "stopped",
            LifecycleState::Starting => "starting",
            LifecycleState::Running => "running",
            LifecycleState::Stopping => "stopping",
            LifecycleState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Point-in-time view of one sub-component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubComponentState {
    pub name: String,
    pub lifecycle: LifecycleState,
    pub last_health: HealthSnapshot,
    pub total_ops: u64,
    pub success_ops: u64,
    pub fail_ops: u64,
}

/// A registered component plus the state the supervisor keeps for it
///
/// Each entry synchronizes on its own, so updates to different components
/// never contend.
pub(crate) struct ManagedComponent {
    pub(crate) component: Arc<dyn SubComponent>,
    lifecycle: AtomicU8,
    last_health: RwLock<HealthSnapshot>,
    total_ops: AtomicU64,
    success_ops: AtomicU64,
    fail_ops: AtomicU64,
}

impl ManagedComponent {
    pub(crate) fn new(component: Arc<dyn SubComponent>) -> Self {
        Self {
            component,
            lifecycle: AtomicU8::new(LifecycleState::Stopped as u8),
            last_health: RwLock::new(HealthSnapshot::default()),
            total_ops: AtomicU64::new(0),
            success_ops: AtomicU64::new(0),
            fail_ops: AtomicU64::new(0),
        }
    }

    pub(crate) fn lifecycle(&self) -> LifecycleState {
        LifecycleState::from(self.lifecycle.load(Ordering::Acquire))
    }

    pub(crate) fn set_lifecycle(&self, state: LifecycleState) {
        self.lifecycle.store(state as u8, Ordering::Release);
    }

    /// Move from `from` to `to`; fails if another caller got there first
    pub(crate) fn transition(&self, from: LifecycleState, to: LifecycleState) -> bool {
        self.lifecycle
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn record_success(&self) {
        self.total_ops.fetch_add(1, Ordering::Relaxed);
        self.success_ops.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.total_ops.fetch_add(1, Ordering::Relaxed);
        self.fail_ops.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set_health(&self, snapshot: HealthSnapshot) {
        *self.last_health.write() = snapshot;
    }

    pub(crate) fn snapshot(&self, name: &str) -> SubComponentState {
        SubComponentState {
            name: name.to_string(),
            lifecycle: self.lifecycle(),
            last_health: self.last_health.read().clone(),
            total_ops: self.total_ops.load(Ordering::Relaxed),
            success_ops: self.success_ops.load(Ordering::Relaxed),
            fail_ops: self.fail_ops.load(Ordering::Relaxed),
        }
    }
}
