//! Utility modules
//!
//! - **error**: Error taxonomy and classification helpers
//! - **logging**: Tracing subscriber setup

pub mod error;
pub mod logging;
