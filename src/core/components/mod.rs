//! Sub-component construction
//!
//! - `echo` - Built-in component that reflects its input
//! - `factory` - Kind to constructor table used at startup

pub mod echo;
pub mod factory;

pub use echo::EchoComponent;
pub use factory::{ComponentConstructor, ComponentFactory};
