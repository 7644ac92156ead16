//! Error types for the coordinator

use crate::core::escalation::AttemptFailure;
use crate::core::supervisor::LifecycleState;
use thiserror::Error;

/// Result type alias for the coordinator
pub type Result<T> = std::result::Result<T, CoordinatorError>;

/// Main error type for the coordinator
///
/// Only `Configuration` is fatal, and only at startup. Every other variant is
/// reported to the caller of a single operation while the coordinator keeps
/// serving.
#[derive(Error, Debug)]
pub enum CoordinatorError {
    /// Invalid static configuration (missing fallback adapter, unknown component kind, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An adapter with the same id is already registered
    #[error("Adapter already registered: {0}")]
    DuplicateAdapter(String),

    /// Adapter id not present in the registry
    #[error("Adapter not found: {0}")]
    NotFound(String),

    /// Registration attempted after startup
    #[error("Adapter registry is closed, cannot register: {0}")]
    RegistryClosed(String),

    /// Component name not known to the supervisor
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    /// Component exists but is not in the Running state
    #[error("Component {component} is not running (state: {state})")]
    ComponentNotRunning {
        component: String,
        state: LifecycleState,
    },

    /// Sub-component raised an error; the cause is kept as-is
    #[error("Component {component} failed: {cause}")]
    ComponentExecution {
        component: String,
        cause: anyhow::Error,
    },

    /// Sub-component call exceeded its time budget
    #[error("Component {component} timed out after {timeout_ms}ms")]
    Timeout { component: String, timeout_ms: u64 },

    /// Primary retries and the fallback adapter all failed
    #[error("{message} ({} failed attempts)", .chain.len())]
    EscalationExhausted {
        message: String,
        chain: Vec<AttemptFailure>,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
