//! # MCP Coordinator
//!
//! Capability-based request router and sub-component coordinator.
//!
//! A request arrives with declared attributes (task type, quality tier,
//! privacy tier, context). The router matches it against the adapter
//! registry's trigger keywords, the supervisor executes it on the adapter's
//! sub-component, the escalation controller retries and falls back to the
//! terminal fallback adapter, and the status aggregator records the outcome.
//!
//! ## Features
//!
//! - **Keyword routing**: literal, case-folded substring matching in
//!   priority order with a guaranteed default
//! - **Supervision**: start/stop/execute/health for named sub-components,
//!   with per-call timeouts and lock-free counters
//! - **Escalation**: fixed-delay retries, per-adapter circuit breakers and a
//!   bounded overall deadline
//! - **Status**: aggregated metrics, overall health and a bounded decision log
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mcp_coordinator::{ClassifiedRequest, Config, CoordinatorBuilder};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/coordinator.yaml").await?;
//!     let coordinator = CoordinatorBuilder::from_config(config).build()?;
//!     coordinator.start().await;
//!
//!     let request = ClassifiedRequest::new("ocr", "scan this invoice");
//!     let outcome = coordinator.dispatch(&request).await?;
//!     println!("served by {}: {}", outcome.adapter_id, outcome.value);
//!
//!     coordinator.shutdown().await;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::components::{ComponentFactory, EchoComponent};
pub use core::coordinator::{Coordinator, CoordinatorBuilder, HealthCheckReport};
pub use core::escalation::{AttemptFailure, CircuitState, DispatchOutcome};
pub use core::registry::AdapterRegistry;
pub use core::router::RuleRouter;
pub use core::status::{CoordinatorMetrics, StatusAggregator};
pub use core::supervisor::{
    ComponentStatus, HealthReport, LifecycleState, ReportedHealth, SubComponent,
    SubComponentState, Supervisor,
};
pub use core::types::{
    AdapterDescriptor, AdapterId, ClassifiedRequest, HealthStatus, OverallHealth, PrivacyLevel,
    QualityLevel, RoutingDecision,
};
pub use utils::error::{CoordinatorError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
