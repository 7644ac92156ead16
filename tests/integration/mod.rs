//! Integration tests for mcp-coordinator
//!
//! These tests drive the public API end to end with real registries,
//! supervisors and escalation controllers.

pub mod config_tests;
pub mod dispatch_tests;
pub mod health_tests;
pub mod routing_tests;
