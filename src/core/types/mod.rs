//! Shared data model
//!
//! Adapter descriptors, classified requests, routing decisions and health
//! status types used across the registry, router, supervisor and aggregator.

pub mod adapter;
pub mod decision;
pub mod health;
pub mod request;

pub use adapter::{AdapterDescriptor, AdapterId};
pub use decision::{DEFAULT_RULE, RoutingDecision};
pub use health::{HealthSnapshot, HealthStatus, OverallHealth};
pub use request::{ClassifiedRequest, PrivacyLevel, QualityLevel};
