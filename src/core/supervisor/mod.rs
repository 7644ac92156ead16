//! Sub-component supervisor
//!
//! - `component` - The contract every sub-component implements
//! - `state` - Lifecycle state and per-component counters
//! - `supervisor` - Lifecycle, execution and health probing

pub mod component;
pub mod state;
pub mod supervisor;


pub use component::{ComponentStatus, HealthReport, ReportedHealth, SubComponent};
pub use state::{LifecycleState, SubComponentState};
pub use supervisor::Supervisor;
