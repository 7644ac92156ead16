//! Coordinator builder

use super::coordinator::Coordinator;
use crate::config::{
    ComponentConfig, Config, EscalationConfig, StatusConfig, SupervisorConfig, Validate,
};
use crate::core::components::ComponentFactory;
use crate::core::escalation::EscalationController;
use crate::core::registry::AdapterRegistry;
use crate::core::router::RuleRouter;
use crate::core::status::StatusAggregator;
use crate::core::supervisor::{SubComponent, Supervisor};
use crate::core::types::AdapterDescriptor;
use crate::utils::error::{CoordinatorError, Result};
use std::sync::Arc;
use tracing::info;

/// Builder for [`Coordinator`]
///
/// Components come either from `ComponentConfig` entries, constructed
/// through the factory, or from ready-made instances.
pub struct CoordinatorBuilder {
    adapters: Vec<AdapterDescriptor>,
    component_configs: Vec<ComponentConfig>,
    components: Vec<Arc<dyn SubComponent>>,
    factory: ComponentFactory,
    escalation: EscalationConfig,
    supervisor: SupervisorConfig,
    status: StatusConfig,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinatorBuilder {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
            component_configs: Vec::new(),
            components: Vec::new(),
            factory: ComponentFactory::with_builtins(),
            escalation: EscalationConfig::default(),
            supervisor: SupervisorConfig::default(),
            status: StatusConfig::default(),
        }
    }

    /// Start from a loaded configuration
    pub fn from_config(config: Config) -> Self {
        Self {
            adapters: config.adapters,
            component_configs: config.components,
            escalation: config.escalation,
            supervisor: config.supervisor,
            status: config.status,
            ..Self::new()
        }
    }

    pub fn factory(mut self, factory: ComponentFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Register an additional component kind
    pub fn component_kind<F>(mut self, kind: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&ComponentConfig) -> anyhow::Result<Arc<dyn SubComponent>> + Send + Sync + 'static,
    {
        self.factory.register(kind, constructor);
        self
    }

    pub fn adapter(mut self, descriptor: AdapterDescriptor) -> Self {
        self.adapters.push(descriptor);
        self
    }

    /// Declare a component to be built by the factory
    pub fn component_config(mut self, config: ComponentConfig) -> Self {
        self.component_configs.push(config);
        self
    }

    /// Add an already constructed component
    pub fn component(mut self, component: Arc<dyn SubComponent>) -> Self {
        self.components.push(component);
        self
    }

    pub fn escalation(mut self, config: EscalationConfig) -> Self {
        self.escalation = config;
        self
    }

    pub fn supervisor(mut self, config: SupervisorConfig) -> Self {
        self.supervisor = config;
        self
    }

    pub fn status(mut self, config: StatusConfig) -> Self {
        self.status = config;
        self
    }

    /// Validate everything, close the registry and assemble the coordinator
    ///
    /// Every failure here is a `Configuration` error except duplicate
    /// adapter ids, which keep their own variant.
    pub fn build(self) -> Result<Arc<Coordinator>> {
        let config_error = CoordinatorError::Configuration;
        self.escalation.validate().map_err(config_error)?;
        self.supervisor.validate().map_err(config_error)?;
        self.status.validate().map_err(config_error)?;

        let registry = Arc::new(AdapterRegistry::new());
        for adapter in self.adapters {
            registry.register(adapter)?;
        }

        let supervisor = Arc::new(Supervisor::new(self.supervisor));
        for config in &self.component_configs {
            config.validate().map_err(config_error)?;
            supervisor.register(self.factory.build(config)?)?;
        }
        for component in self.components {
            supervisor.register(component)?;
        }

        for adapter in registry.list() {
            if !supervisor.contains(&adapter.component) {
                return Err(CoordinatorError::configuration(format!(
                    "Adapter {} is served by unknown component {}",
                    adapter.id, adapter.component
                )));
            }
        }

        registry.close()?;

        let router = RuleRouter::new(registry.clone());
        let escalation =
            EscalationController::new(registry.clone(), supervisor.clone(), self.escalation);
        let aggregator = StatusAggregator::new(&self.status);

        info!(
            "Coordinator built with {} adapters and {} components",
            registry.len(),
            supervisor.len()
        );

        Ok(Arc::new(Coordinator::new(
            registry, router, supervisor, escalation, aggregator,
        )))
    }
}
