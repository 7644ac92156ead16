//! Dispatch outcomes

use crate::core::types::AdapterId;
use crate::utils::error::CoordinatorError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One failed attempt in an escalation chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptFailure {
    pub adapter_id: AdapterId,
    /// 1-based attempt number on that adapter
    pub attempt: u32,
    /// Error kind label, see `CoordinatorError::kind`
    pub kind: String,
    pub message: String,
}

impl AttemptFailure {
    pub fn new(adapter_id: impl Into<String>, attempt: u32, error: &CoordinatorError) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            attempt,
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

/// Successful result of `execute_with_fallback`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Adapter whose component produced `value`
    pub adapter_id: AdapterId,
    pub value: Value,
    /// Attempts made across primary and fallback
    pub attempts: u32,
    /// Served by the fallback after the primary gave up
    pub escalated: bool,
    /// The primary was skipped because its circuit was open
    pub short_circuited: bool,
    pub latency_ms: u64,
    /// Failed attempts that preceded the success
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<AttemptFailure>,
}
