//! The Validate trait
//!
//! Every configuration section checks itself and reports the first problem
//! as a plain message; `Config::validate` turns it into a configuration error.

/// Self-check for a configuration section
pub trait Validate {
    /// `Err` carries a human readable description of the first violation
    fn validate(&self) -> Result<(), String>;
}
