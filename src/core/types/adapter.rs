//! Adapter descriptor
//!
//! Static metadata for one backend adapter: what it can do, how eagerly it is
//! tried, and which keywords pull a request towards it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Adapter identifier (unique within the registry)
pub type AdapterId = String;

/// Descriptor for a registered backend adapter
///
/// Descriptors are immutable once registered. Trigger keywords are case-folded
/// and de-duplicated on construction; their order of first appearance decides
/// which keyword is reported as the matched rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterDescriptor {
    /// Unique adapter id
    pub id: AdapterId,
    /// Human readable name
    #[serde(default)]
    pub name: String,
    /// Declared capability tags
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// Priority (lower value = tried first)
    #[serde(default)]
    pub priority: u32,
    /// Keywords that make this adapter a routing candidate
    #[serde(default, rename = "trigger_conditions")]
    pub triggers: Vec<String>,
    /// Workflows this adapter participates in, in declared order
    #[serde(default)]
    pub supported_workflows: Vec<String>,
    /// Whether this is the terminal fallback adapter
    #[serde(default, rename = "fallback")]
    pub is_fallback: bool,
    /// Sub-component serving this adapter (defaults to the adapter id)
    #[serde(default)]
    pub component: String,
}

impl AdapterDescriptor {
    /// Create a descriptor with the given id and priority
    pub fn new(id: impl Into<String>, priority: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            component: id.clone(),
            id,
            capabilities: BTreeSet::new(),
            priority,
            triggers: Vec::new(),
            supported_workflows: Vec::new(),
            is_fallback: false,
        }
    }

    /// Create the terminal fallback descriptor
    pub fn fallback(id: impl Into<String>, priority: u32) -> Self {
        Self::new(id, priority).as_fallback()
    }

    /// Set the human readable name (builder pattern)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Add capability tags (builder pattern)
    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities
            .extend(capabilities.into_iter().map(Into::into));
        self
    }

    /// Add trigger keywords (builder pattern)
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers
            .extend(triggers.into_iter().map(Into::into));
        self.normalized()
    }

    /// Set supported workflows (builder pattern)
    pub fn with_workflows<I, S>(mut self, workflows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.supported_workflows = workflows.into_iter().map(Into::into).collect();
        self
    }

    /// Bind the adapter to a sub-component (builder pattern)
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Flag the adapter as the terminal fallback (builder pattern)
    pub fn as_fallback(mut self) -> Self {
        self.is_fallback = true;
        self
    }

    /// Case-fold and de-duplicate triggers, fill defaulted fields
    ///
    /// Descriptors deserialized from configuration go through this before
    /// registration so that they behave exactly like builder-made ones.
    pub fn normalized(mut self) -> Self {
        let mut seen = BTreeSet::new();
        self.triggers = self
            .triggers
            .into_iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();

        if self.name.is_empty() {
            self.name = self.id.clone();
        }
        if self.component.is_empty() {
            self.component = self.id.clone();
        }
        self
    }

    /// Check whether the adapter declares a capability
    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.contains(tag)
    }

    /// First trigger keyword that occurs literally in `text`
    ///
    /// `text` must already be case-folded.
    pub fn first_matching_trigger(&self, text: &str) -> Option<&str> {
        self.triggers
            .iter()
            .find(|t| text.contains(t.as_str()))
            .map(String::as_str)
    }
}
