//! Helper functions for creating and classifying errors

use super::types::CoordinatorError;

impl CoordinatorError {
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration(message.into())
    }

    pub fn not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound(id.into())
    }

    pub fn unknown_component<S: Into<String>>(name: S) -> Self {
        Self::UnknownComponent(name.into())
    }

    pub fn execution<S: Into<String>>(component: S, cause: anyhow::Error) -> Self {
        Self::ComponentExecution {
            component: component.into(),
            cause,
        }
    }

    pub fn timeout<S: Into<String>>(component: S, timeout_ms: u64) -> Self {
        Self::Timeout {
            component: component.into(),
            timeout_ms,
        }
    }

    /// Whether another attempt may succeed
    ///
    /// Execution failures and timeouts drive retries; a component that is not
    /// running may come up later, so it is retried as well.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ComponentExecution { .. } | Self::Timeout { .. } | Self::ComponentNotRunning { .. }
        )
    }

    /// Whether the error must stop the process (startup only)
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    /// Stable snake_case label for logs and counters
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::DuplicateAdapter(_) => "duplicate_adapter",
            Self::NotFound(_) => "not_found",
            Self::RegistryClosed(_) => "registry_closed",
            Self::UnknownComponent(_) => "unknown_component",
            Self::ComponentNotRunning { .. } => "component_not_running",
            Self::ComponentExecution { .. } => "component_execution",
            Self::Timeout { .. } => "timeout",
            Self::EscalationExhausted { .. } => "escalation_exhausted",
            Self::Io(_) => "io",
            Self::Yaml(_) => "yaml",
            Self::Serialization(_) => "serialization",
        }
    }
}
