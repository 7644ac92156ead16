//! Dispatch, retry and escalation tests

#[cfg(test)]
mod tests {
    use crate::common::{TestComponent, scenario_builder};
    use mcp_coordinator::config::{CircuitBreakerConfig, EscalationConfig};
    use mcp_coordinator::{ClassifiedRequest, CoordinatorError};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_failing_primary_retries_then_escalates() {
        let a = Arc::new(TestComponent::failing("a"));
        let f = Arc::new(TestComponent::new("f"));
        let coordinator = scenario_builder(a.clone(), Arc::new(TestComponent::new("b")), f.clone())
            .build()
            .unwrap();
        coordinator.start().await;

        let outcome = coordinator
            .dispatch(&ClassifiedRequest::new("", "generate python code"))
            .await
            .unwrap();

        assert_eq!(a.calls(), 3);
        assert_eq!(f.calls(), 1);
        assert!(outcome.escalated);
        assert_eq!(outcome.adapter_id, "F");
        assert_eq!(outcome.value["handled_by"], "f");

        let metrics = coordinator.get_system_status();
        assert_eq!(metrics.escalations, 1);
        assert_eq!(metrics.successful_operations, 1);
    }

    #[tokio::test]
    async fn test_exhausted_chain_carries_message() {
        let a = Arc::new(TestComponent::failing("a"));
        let f = Arc::new(TestComponent::failing("f"));
        let coordinator = scenario_builder(a, Arc::new(TestComponent::new("b")), f)
            .build()
            .unwrap();
        coordinator.start().await;

        let error = crate::assert_err!(
            coordinator
                .dispatch(&ClassifiedRequest::new("", "python"))
                .await
        );
        match error {
            CoordinatorError::EscalationExhausted { message, chain } => {
                assert_eq!(message, "All backends unavailable");
                let adapters: Vec<_> = chain.iter().map(|f| f.adapter_id.as_str()).collect();
                assert_eq!(adapters, vec!["A", "A", "A", "F"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(coordinator.get_system_status().failed_operations, 1);
    }

    #[tokio::test]
    async fn test_circuit_breaker_stops_hammering() {
        let a = Arc::new(TestComponent::failing("a"));
        let f = Arc::new(TestComponent::new("f"));
        let coordinator = scenario_builder(a.clone(), Arc::new(TestComponent::new("b")), f.clone())
            .escalation(EscalationConfig {
                retry_count: 2,
                retry_delay_ms: 0,
                circuit_breaker: CircuitBreakerConfig {
                    enabled: true,
                    failure_rate_threshold: 0.5,
                    min_requests: 4,
                    window_secs: 60,
                    open_secs: 60,
                },
                ..EscalationConfig::default()
            })
            .build()
            .unwrap();
        coordinator.start().await;

        for _ in 0..5 {
            coordinator
                .dispatch(&ClassifiedRequest::new("", "python"))
                .await
                .unwrap();
        }

        // two dispatches with two attempts each open the circuit
        assert_eq!(a.calls(), 4);
        assert_eq!(f.calls(), 5);

        let states = coordinator.circuit_states();
        assert_eq!(states["A"].state, mcp_coordinator::CircuitState::Open);
    }

    #[tokio::test]
    async fn test_slow_component_times_out_and_escalates() {
        let a = Arc::new(TestComponent::new("a"));
        a.set_delay(Duration::from_secs(10));
        let f = Arc::new(TestComponent::new("f"));
        let coordinator = scenario_builder(a.clone(), Arc::new(TestComponent::new("b")), f)
            .escalation(EscalationConfig {
                retry_count: 2,
                retry_delay_ms: 0,
                attempt_timeout_ms: 30,
                overall_deadline_ms: 1_000,
                circuit_breaker: CircuitBreakerConfig::disabled(),
                ..EscalationConfig::default()
            })
            .build()
            .unwrap();
        coordinator.start().await;

        let started = std::time::Instant::now();
        let outcome = coordinator
            .dispatch(&ClassifiedRequest::new("", "python"))
            .await
            .unwrap();
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(outcome.escalated);
        assert!(outcome.failures.iter().all(|f| f.kind == "timeout"));
        assert_eq!(a.calls(), 2);
    }

    #[tokio::test]
    async fn test_dispatch_before_start_escalates_and_fails() {
        let coordinator = scenario_builder(
            Arc::new(TestComponent::new("a")),
            Arc::new(TestComponent::new("b")),
            Arc::new(TestComponent::new("f")),
        )
        .build()
        .unwrap();

        let error = crate::assert_err!(
            coordinator
                .dispatch(&ClassifiedRequest::new("", "python"))
                .await
        );
        assert!(!error.is_fatal());
        assert_eq!(error.kind(), "escalation_exhausted");
    }

    #[tokio::test]
    async fn test_concurrent_dispatch_counts_everything() {
        let coordinator = scenario_builder(
            Arc::new(TestComponent::new("a")),
            Arc::new(TestComponent::new("b")),
            Arc::new(TestComponent::new("f")),
        )
        .build()
        .unwrap();
        coordinator.start().await;

        let contents = ["python", "ui", "hello"];
        let tasks: Vec<_> = (0..60)
            .map(|i| {
                let coordinator = coordinator.clone();
                let content = contents[i % 3];
                tokio::spawn(async move {
                    coordinator
                        .dispatch(&ClassifiedRequest::new("", content))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let metrics = coordinator.get_system_status();
        assert_eq!(metrics.total_operations, 60);
        assert_eq!(metrics.adapters["A"].requests, 20);
        assert_eq!(metrics.adapters["B"].requests, 20);
        assert_eq!(metrics.adapters["F"].requests, 20);
    }
}
