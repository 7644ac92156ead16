//! Sub-component declarations

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One sub-component to construct at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentConfig {
    /// Unique component name
    pub name: String,
    /// Constructor key in the component factory table
    pub kind: String,
    /// Kind-specific options
    #[serde(default)]
    pub options: Value,
}

impl ComponentConfig {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(mut self, options: Value) -> Self {
        self.options = options;
        self
    }
}
