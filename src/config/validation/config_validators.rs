//! Top-level configuration validators
//!
//! Checks that the adapter registry and the component table agree with each
//! other before anything is constructed.

use super::trait_def::Validate;
use crate::config::Config;
use crate::config::models::ComponentConfig;
use crate::core::registry::check_fallback_invariant;
use std::collections::HashSet;
use tracing::debug;

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating coordinator configuration");

        if self.adapters.is_empty() {
            return Err("At least one adapter must be configured".to_string());
        }

        let mut ids = HashSet::new();
        for adapter in &self.adapters {
            if adapter.id.trim().is_empty() {
                return Err("Adapter id cannot be empty".to_string());
            }
            if !ids.insert(adapter.id.as_str()) {
                return Err(format!("Duplicate adapter id: {}", adapter.id));
            }
        }

        check_fallback_invariant(&self.adapters)?;

        let mut names = HashSet::new();
        for component in &self.components {
            component.validate()?;
            if !names.insert(component.name.as_str()) {
                return Err(format!("Duplicate component name: {}", component.name));
            }
        }

        for adapter in &self.adapters {
            if !names.contains(adapter.component.as_str()) {
                return Err(format!(
                    "Adapter {} is served by undeclared component {}",
                    adapter.id, adapter.component
                ));
            }
        }

        self.escalation.validate()?;
        self.supervisor.validate()?;
        self.status.validate()?;

        Ok(())
    }
}

impl Validate for ComponentConfig {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Component name cannot be empty".to_string());
        }
        if self.kind.trim().is_empty() {
            return Err(format!("Component {} has no kind", self.name));
        }
        Ok(())
    }
}
