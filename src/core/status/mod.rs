//! Coordinator-level status
//!
//! - `aggregator` - Outcome counters and the bounded decision log
//! - `metrics` - Snapshot types and the overall health policy

pub mod aggregator;
pub mod metrics;


pub use aggregator::StatusAggregator;
pub use metrics::{AdapterStats, CoordinatorMetrics, overall_health};
