//! Common test utilities
//!
//! - Test components whose failures and probes can be scripted
//! - Configuration fixtures

pub mod components;
pub mod fixtures;

pub use components::{Probe, TestComponent};
pub use fixtures::{scenario_builder, scenario_yaml, write_config};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
