//! Core coordinator logic
//!
//! Leaves first: `types` and `registry` hold static adapter metadata,
//! `router` picks an adapter, `supervisor` runs sub-components, `escalation`
//! retries and falls back, `status` aggregates outcomes, and `coordinator`
//! ties them together.

pub mod components;
pub mod coordinator;
pub mod escalation;
pub mod registry;
pub mod router;
pub mod status;
pub mod supervisor;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use coordinator::{Coordinator, CoordinatorBuilder, HealthCheckReport};
