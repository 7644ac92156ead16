//! Health and status tests

#[cfg(test)]
mod tests {
    use crate::common::{Probe, TestComponent, scenario_builder};
    use mcp_coordinator::{HealthStatus, LifecycleState, OverallHealth};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    struct Fixture {
        coordinator: Arc<mcp_coordinator::Coordinator>,
        a: Arc<TestComponent>,
        b: Arc<TestComponent>,
    }

    async fn fixture() -> Fixture {
        let a = Arc::new(TestComponent::new("a"));
        let b = Arc::new(TestComponent::new("b"));
        let coordinator = scenario_builder(a.clone(), b.clone(), Arc::new(TestComponent::new("f")))
            .build()
            .unwrap();
        coordinator.start().await;
        Fixture { coordinator, a, b }
    }

    #[tokio::test]
    async fn test_all_healthy() {
        let f = fixture().await;
        let report = f.coordinator.health_check().await;
        assert_eq!(report.overall_health, OverallHealth::Healthy);
        assert!(
            report
                .components
                .values()
                .all(|s| s.lifecycle == LifecycleState::Running)
        );
    }

    #[tokio::test]
    async fn test_hung_probe_is_unknown_and_bounded() {
        let f = fixture().await;
        f.a.set_probe(Probe::Hang);

        let started = Instant::now();
        let report = f.coordinator.health_check().await;
        assert!(started.elapsed() < Duration::from_secs(2));

        assert_eq!(report.components["a"].last_health.status, HealthStatus::Unknown);
        assert_eq!(report.components["b"].last_health.status, HealthStatus::Healthy);
        assert_eq!(report.overall_health, OverallHealth::Degraded);
    }

    #[tokio::test]
    async fn test_health_policy_thresholds() {
        let f = fixture().await;

        f.a.set_probe(Probe::Error);
        let report = f.coordinator.health_check().await;
        assert_eq!(report.components["a"].last_health.status, HealthStatus::Unhealthy);
        assert_eq!(report.overall_health, OverallHealth::Degraded);

        f.b.set_probe(Probe::Error);
        let report = f.coordinator.health_check().await;
        assert_eq!(report.overall_health, OverallHealth::Unhealthy);

        f.a.set_probe(Probe::Healthy);
        f.b.set_probe(Probe::Degraded);
        let report = f.coordinator.health_check().await;
        assert_eq!(report.overall_health, OverallHealth::Degraded);
    }

    #[tokio::test]
    async fn test_status_reflects_last_probe() {
        let f = fixture().await;
        f.a.set_probe(Probe::Error);
        f.b.set_probe(Probe::Error);
        f.coordinator.health_check().await;

        let metrics = f.coordinator.get_system_status();
        assert_eq!(metrics.sub_component_count, 3);
        assert_eq!(metrics.overall_health, OverallHealth::Unhealthy);

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["overall_health"], "unhealthy");
    }

    #[tokio::test]
    async fn test_shutdown_makes_components_unknown() {
        let f = fixture().await;
        f.coordinator.shutdown().await;

        let report = f.coordinator.health_check().await;
        assert!(
            report
                .components
                .values()
                .all(|s| s.last_health.status == HealthStatus::Unknown)
        );
        assert_eq!(report.overall_health, OverallHealth::Degraded);
    }
}
