//! Component factory
//!
//! Components are declared in configuration by `kind`. The factory maps each
//! kind to a constructor; there is no loading by name at runtime.

use super::echo::EchoComponent;
use crate::config::ComponentConfig;
use crate::core::supervisor::SubComponent;
use crate::utils::error::{CoordinatorError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builds a component from its configuration entry
pub type ComponentConstructor =
    Arc<dyn Fn(&ComponentConfig) -> anyhow::Result<Arc<dyn SubComponent>> + Send + Sync>;

/// Startup-time registration table of component kinds
#[derive(Clone)]
pub struct ComponentFactory {
    constructors: HashMap<String, ComponentConstructor>,
}

impl std::fmt::Debug for ComponentFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentFactory")
            .field("kinds", &self.kinds())
            .finish()
    }
}

impl Default for ComponentFactory {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl ComponentFactory {
    /// A factory with no kinds
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A factory with the built-in kinds (`echo`)
    pub fn with_builtins() -> Self {
        let mut factory = Self::empty();
        factory.register("echo", |config| {
            Ok(Arc::new(EchoComponent::from_config(config)?) as Arc<dyn SubComponent>)
        });
        factory
    }

    /// Register a constructor for `kind`, replacing any previous one
    pub fn register<F>(&mut self, kind: impl Into<String>, constructor: F)
    where
        F: Fn(&ComponentConfig) -> anyhow::Result<Arc<dyn SubComponent>> + Send + Sync + 'static,
    {
        self.constructors.insert(kind.into(), Arc::new(constructor));
    }

    pub fn supports(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kinds, sorted
    pub fn kinds(&self) -> Vec<String> {
        let mut kinds: Vec<_> = self.constructors.keys().cloned().collect();
        kinds.sort();
        kinds
    }

    /// Construct the component described by `config`
    pub fn build(&self, config: &ComponentConfig) -> Result<Arc<dyn SubComponent>> {
        let constructor = self.constructors.get(&config.kind).ok_or_else(|| {
            CoordinatorError::configuration(format!(
                "Unknown component kind '{}' for component {}",
                config.kind, config.name
            ))
        })?;

        let component = constructor(config).map_err(|e| {
            CoordinatorError::configuration(format!(
                "Failed to construct component {}: {}",
                config.name, e
            ))
        })?;

        if component.name() != config.name {
            return Err(CoordinatorError::configuration(format!(
                "Component kind '{}' built '{}' for entry {}",
                config.kind,
                component.name(),
                config.name
            )));
        }

        debug!("Constructed component {} of kind {}", config.name, config.kind);
        Ok(component)
    }
}
