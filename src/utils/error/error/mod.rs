//! Error handling for the coordinator
//!
//! This module defines all error types used throughout the coordinator.

mod helpers;
mod types;

pub use types::{CoordinatorError, Result};
