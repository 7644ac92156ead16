//! Configuration fixtures

use super::components::TestComponent;
use mcp_coordinator::config::{CircuitBreakerConfig, EscalationConfig, SupervisorConfig};
use mcp_coordinator::{AdapterDescriptor, CoordinatorBuilder};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// YAML for the reference scenario: A (code, python), B (ui, test), F fallback
pub fn scenario_yaml() -> &'static str {
    r#"
adapters:
  - id: A
    priority: 1
    capabilities: [coding]
    trigger_conditions: [code, python]
    component: a
  - id: B
    priority: 2
    capabilities: [coding, testing]
    trigger_conditions: [ui, test]
    component: b
  - id: F
    priority: 999
    fallback: true
    component: f
components:
  - name: a
    kind: echo
  - name: b
    kind: echo
  - name: f
    kind: echo
escalation:
  retry_count: 3
  retry_delay_ms: 0
  attempt_timeout_ms: 1000
  overall_deadline_ms: 10000
  fallback_message: All backends unavailable
  circuit_breaker:
    enabled: false
supervisor:
  probe_timeout_ms: 100
status:
  decision_log_capacity: 50
"#
}

/// Write YAML to a temporary file that lives as long as the handle
pub fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(yaml.as_bytes()).expect("write temp config");
    file
}

/// The reference scenario wired to test components `a`, `b` and `f`
pub fn scenario_builder(
    a: Arc<TestComponent>,
    b: Arc<TestComponent>,
    f: Arc<TestComponent>,
) -> CoordinatorBuilder {
    CoordinatorBuilder::new()
        .adapter(
            AdapterDescriptor::new("A", 1)
                .with_capabilities(["coding"])
                .with_triggers(["code", "python"])
                .with_component("a"),
        )
        .adapter(
            AdapterDescriptor::new("B", 2)
                .with_capabilities(["coding", "testing"])
                .with_triggers(["ui", "test"])
                .with_component("b"),
        )
        .adapter(AdapterDescriptor::fallback("F", 999).with_component("f"))
        .component(a)
        .component(b)
        .component(f)
        .escalation(EscalationConfig {
            retry_count: 3,
            retry_delay_ms: 0,
            fallback_message: "All backends unavailable".to_string(),
            circuit_breaker: CircuitBreakerConfig::disabled(),
            ..EscalationConfig::default()
        })
        .supervisor(SupervisorConfig {
            probe_timeout_ms: 100,
            ..SupervisorConfig::default()
        })
}
