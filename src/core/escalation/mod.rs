//! Retry, circuit breaking and escalation to the fallback adapter
//!
//! - `circuit_breaker` - Per-adapter rolling-window circuit breaker
//! - `controller` - The retry/escalation policy
//! - `outcome` - Dispatch results and the failure chain

pub mod circuit_breaker;
pub mod controller;
pub mod outcome;


pub use circuit_breaker::{CircuitBreaker, CircuitBreakerMetrics, CircuitState};
pub use controller::EscalationController;
pub use outcome::{AttemptFailure, DispatchOutcome};
