//! Routing tests through the coordinator

#[cfg(test)]
mod tests {
    use crate::common::{TestComponent, scenario_builder};
    use mcp_coordinator::{ClassifiedRequest, Coordinator, PrivacyLevel, QualityLevel};
    use std::sync::Arc;

    fn coordinator() -> Arc<Coordinator> {
        scenario_builder(
            Arc::new(TestComponent::new("a")),
            Arc::new(TestComponent::new("b")),
            Arc::new(TestComponent::new("f")),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_reference_scenario() {
        let coordinator = coordinator();

        let decision = coordinator
            .route(&ClassifiedRequest::new("", "generate python code"))
            .unwrap();
        assert_eq!(decision.selected_adapter_id, "A");
        assert_eq!(decision.matched_rule, "code");

        let decision = coordinator
            .route(&ClassifiedRequest::new("", "hello world"))
            .unwrap();
        assert_eq!(decision.selected_adapter_id, "F");
        assert_eq!(decision.matched_rule, "default");
    }

    #[test]
    fn test_levels_do_not_affect_routing() {
        let coordinator = coordinator();
        let plain = coordinator
            .route(&ClassifiedRequest::new("", "review the ui"))
            .unwrap();
        let tiered = coordinator
            .route(
                &ClassifiedRequest::new("", "review the ui")
                    .with_quality(QualityLevel::UltraHigh)
                    .with_privacy(PrivacyLevel::High),
            )
            .unwrap();
        assert!(plain.same_route(&tiered));
        assert_eq!(tiered.selected_adapter_id, "B");
    }

    #[test]
    fn test_every_route_is_registered_and_logged() {
        let coordinator = coordinator();
        let ids: Vec<_> = coordinator
            .list_adapters()
            .into_iter()
            .map(|a| a.id)
            .collect();

        let contents = ["", "python", "UI", "write tests", "nothing", "Code review"];
        for content in contents {
            let decision = coordinator
                .route(&ClassifiedRequest::new("misc", content))
                .unwrap();
            assert!(ids.contains(&decision.selected_adapter_id));
        }

        let recent = coordinator.recent_decisions(100);
        assert_eq!(recent.len(), contents.len());
        // newest first: "Code review" routes to A
        assert_eq!(recent[0].selected_adapter_id, "A");
    }

    #[test]
    fn test_capability_filter() {
        let coordinator = coordinator();
        let decision = coordinator
            .route(&ClassifiedRequest::new("", "python test").with_capability("testing"))
            .unwrap();
        assert_eq!(decision.selected_adapter_id, "B");
        assert_eq!(decision.matched_rule, "test");
    }

    #[tokio::test]
    async fn test_concurrent_routing_is_deterministic() {
        let coordinator = coordinator();
        let tasks: Vec<_> = (0..32)
            .map(|_| {
                let coordinator = coordinator.clone();
                tokio::spawn(async move {
                    coordinator
                        .route(&ClassifiedRequest::new("", "test the python ui"))
                        .unwrap()
                })
            })
            .collect();

        for task in tasks {
            let decision = task.await.unwrap();
            assert_eq!(decision.selected_adapter_id, "A");
            assert_eq!(decision.matched_rule, "python");
        }
    }
}
