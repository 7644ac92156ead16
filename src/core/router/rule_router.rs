//! Keyword rule router
//!
//! Maps a classified request to exactly one adapter. Adapters are scanned in
//! priority order and the first one with a trigger keyword occurring in the
//! request's routing text wins. The scan is a literal, case-folded substring
//! check; there is no scoring and no keyword specificity.

use crate::core::registry::AdapterRegistry;
use crate::core::types::{ClassifiedRequest, RoutingDecision};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Rule-based router over an adapter registry
#[derive(Debug, Clone)]
pub struct RuleRouter {
    registry: Arc<AdapterRegistry>,
}

impl RuleRouter {
    pub fn new(registry: Arc<AdapterRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<AdapterRegistry> {
        &self.registry
    }

    /// Route a request to one adapter
    ///
    /// Never yields "no match": requests with empty content, or whose routing
    /// text contains no trigger keyword, resolve to the fallback adapter with
    /// `matched_rule == "default"`. The only error is a registry without a
    /// fallback adapter, which startup validation rules out.
    pub fn route(&self, request: &ClassifiedRequest) -> Result<RoutingDecision> {
        if request.has_empty_content() {
            let fallback = self.registry.default_fallback()?;
            debug!("Empty content, routing to default adapter {}", fallback.id);
            return Ok(RoutingDecision::default_route(fallback.id.clone()));
        }

        let text = request.routing_text();
        let candidates = match request.capability.as_deref() {
            Some(tag) => self.registry.list_by_capability(tag),
            None => self.registry.list_by_priority(),
        };

        for adapter in &candidates {
            if let Some(keyword) = adapter.first_matching_trigger(&text) {
                debug!(
                    "Routed task '{}' to {} via keyword '{}'",
                    request.task_type, adapter.id, keyword
                );
                return Ok(RoutingDecision::matched(adapter.id.clone(), keyword));
            }
        }

        let fallback = self.registry.default_fallback()?;
        debug!(
            "No trigger matched task '{}', routing to default adapter {}",
            request.task_type, fallback.id
        );
        Ok(RoutingDecision::default_route(fallback.id.clone()))
    }
}
