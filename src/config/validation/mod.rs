//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `config_validators`: Top-level and registry validators
//! - `escalation_validators`: Retry, circuit breaker, supervisor and status validators
//! - `tests`: Test suite for all validators

mod config_validators;
mod escalation_validators;
mod trait_def;

pub use trait_def::Validate;
