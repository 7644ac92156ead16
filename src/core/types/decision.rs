//! Routing decisions

use super::adapter::AdapterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Rule label recorded when no trigger keyword matched
pub const DEFAULT_RULE: &str = "default";

/// Outcome of routing one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    /// Decision id, for correlating log lines
    pub id: Uuid,
    pub selected_adapter_id: AdapterId,
    /// Matched trigger keyword, or `"default"`
    pub matched_rule: String,
    pub timestamp: DateTime<Utc>,
}

impl RoutingDecision {
    pub fn matched(adapter_id: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            selected_adapter_id: adapter_id.into(),
            matched_rule: keyword.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn default_route(adapter_id: impl Into<String>) -> Self {
        Self::matched(adapter_id, DEFAULT_RULE)
    }

    pub fn is_default(&self) -> bool {
        self.matched_rule == DEFAULT_RULE
    }

    /// Same adapter and rule, ignoring id and timestamp
    pub fn same_route(&self, other: &RoutingDecision) -> bool {
        self.selected_adapter_id == other.selected_adapter_id
            && self.matched_rule == other.matched_rule
    }
}
