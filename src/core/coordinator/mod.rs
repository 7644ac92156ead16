//! Coordinator facade
//!
//! - `builder` - Assembles a coordinator from configuration or code
//! - `coordinator` - The operations exposed to callers

pub mod builder;
pub mod coordinator;


pub use builder::CoordinatorBuilder;
pub use coordinator::{Coordinator, HealthCheckReport};
