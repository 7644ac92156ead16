//! Configuration loading tests

#[cfg(test)]
mod tests {
    use crate::common::{scenario_yaml, write_config};
    use mcp_coordinator::{ClassifiedRequest, Config, CoordinatorBuilder, CoordinatorError};

    #[tokio::test]
    async fn test_file_config_builds_working_coordinator() {
        let file = write_config(scenario_yaml());
        let config = crate::assert_ok!(Config::from_file(file.path()).await);
        assert_eq!(config.adapters.len(), 3);
        assert_eq!(config.escalation.retry_count, 3);
        assert_eq!(config.status.decision_log_capacity, 50);

        let coordinator = crate::assert_ok!(CoordinatorBuilder::from_config(config).build());
        coordinator.start().await;

        let outcome = crate::assert_ok!(
            coordinator
                .dispatch(&ClassifiedRequest::new("coding", "write python code"))
                .await
        );
        assert_eq!(outcome.adapter_id, "A");
        assert_eq!(outcome.value["component"], "a");
        assert_eq!(outcome.value["operation"], "coding");
    }

    #[test]
    fn test_env_overrides_on_loaded_config() {
        let mut config = crate::assert_ok!(Config::from_yaml_str(scenario_yaml()));
        crate::assert_ok!(config.apply_overrides_from(|key| match key {
            "COORDINATOR_RETRY_COUNT" => Some("5".to_string()),
            "COORDINATOR_PROBE_TIMEOUT_MS" => Some("250".to_string()),
            _ => None,
        }));
        assert_eq!(config.escalation.retry_count, 5);
        assert_eq!(config.supervisor.probe_timeout_ms, 250);
    }

    #[test]
    fn test_missing_fallback_is_fatal() {
        let yaml = scenario_yaml().replace("    fallback: true\n", "");
        let error = crate::assert_err!(Config::from_yaml_str(&yaml));
        assert!(error.is_fatal());
        assert!(matches!(error, CoordinatorError::Configuration(_)));
    }

    #[test]
    fn test_fallback_must_sort_last() {
        let yaml = scenario_yaml().replace("priority: 999", "priority: 2");
        let error = crate::assert_err!(Config::from_yaml_str(&yaml));
        assert!(error.to_string().contains("lowest priority"));
    }

    #[test]
    fn test_undeclared_component_rejected() {
        let yaml = scenario_yaml().replace("    component: b\n", "    component: ghost\n");
        let error = crate::assert_err!(Config::from_yaml_str(&yaml));
        assert!(error.to_string().contains("ghost"));
    }

    #[test]
    fn test_unknown_component_kind_rejected_at_build() {
        let yaml = scenario_yaml().replace("  - name: b\n    kind: echo", "  - name: b\n    kind: vision_api");
        let config = crate::assert_ok!(Config::from_yaml_str(&yaml));
        let error = crate::assert_err!(CoordinatorBuilder::from_config(config).build());
        assert!(error.is_fatal());
        assert!(error.to_string().contains("vision_api"));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let yaml = scenario_yaml().replace(
            "    enabled: false",
            "    enabled: true\n    failure_rate_threshold: 1.5",
        );
        let error = crate::assert_err!(Config::from_yaml_str(&yaml));
        assert!(error.to_string().contains("threshold"));
    }
}
