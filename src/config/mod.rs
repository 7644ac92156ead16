//! Configuration management for the coordinator
//!
//! Configuration is loaded once at startup: adapter registry contents,
//! sub-component declarations, retry and circuit breaker parameters, timeouts
//! and logging. Nothing here is reloaded at runtime.

pub mod loader;
pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::types::AdapterDescriptor;
use crate::utils::error::{CoordinatorError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the coordinator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Adapter registry contents
    #[serde(default)]
    pub adapters: Vec<AdapterDescriptor>,
    /// Sub-components to construct
    #[serde(default)]
    pub components: Vec<ComponentConfig>,
    /// Retry, escalation and circuit breaker settings
    #[serde(default)]
    pub escalation: EscalationConfig,
    /// Supervisor timeouts
    #[serde(default)]
    pub supervisor: SupervisorConfig,
    /// Status aggregator settings
    #[serde(default)]
    pub status: StatusConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            CoordinatorError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_yaml_str(&content)?;
        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let mut config: Config = serde_yaml::from_str(content)
            .map_err(|e| CoordinatorError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.adapters = config
            .adapters
            .into_iter()
            .map(AdapterDescriptor::normalized)
            .collect();

        config.validate()?;
        Ok(config)
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        Validate::validate(self).map_err(CoordinatorError::Configuration)?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
adapters:
  - id: local_ocr
    name: Local OCR
    priority: 1
    capabilities: [ocr]
    trigger_conditions: [OCR, scan]
  - id: cloud_vision
    priority: 2
    capabilities: [ocr, vision]
    trigger_conditions: [handwriting, table]
  - id: fallback_creator
    priority: 999
    fallback: true
components:
  - name: local_ocr
    kind: echo
  - name: cloud_vision
    kind: echo
  - name: fallback_creator
    kind: echo
escalation:
  retry_count: 2
  retry_delay_ms: 10
  circuit_breaker:
    enabled: false
"#;

    #[tokio::test]
    async fn test_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.adapters.len(), 3);
        assert_eq!(config.adapters[0].triggers, vec!["ocr", "scan"]);
        assert_eq!(config.adapters[1].name, "cloud_vision");
        assert!(config.adapters[2].is_fallback);
        assert_eq!(config.escalation.retry_count, 2);
        assert!(!config.escalation.circuit_breaker.enabled);
        assert_eq!(config.supervisor.probe_timeout_ms, 5_000);
    }

    #[tokio::test]
    async fn test_config_missing_file() {
        let result = Config::from_file("/definitely/not/here.yaml").await;
        assert!(matches!(result, Err(CoordinatorError::Configuration(_))));
    }

    #[test]
    fn test_config_parse_error_is_configuration_error() {
        let result = Config::from_yaml_str("adapters: [");
        assert!(matches!(result, Err(CoordinatorError::Configuration(_))));
    }

    #[test]
    fn test_config_without_fallback_is_rejected() {
        let yaml = r#"
adapters:
  - id: a
    priority: 1
components:
  - name: a
    kind: echo
"#;
        let error = Config::from_yaml_str(yaml).unwrap_err();
        assert!(error.is_fatal());
        assert!(error.to_string().contains("fallback"));
    }

    #[test]
    fn test_yaml_roundtrip_keeps_registry() {
        let config = Config::from_yaml_str(SAMPLE).unwrap();
        let reparsed = Config::from_yaml_str(&config.to_yaml().unwrap()).unwrap();
        assert_eq!(config.adapters, reparsed.adapters);
    }
}
