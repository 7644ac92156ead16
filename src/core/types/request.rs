//! Classified request types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Requested output quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    Low,
    #[default]
    Medium,
    High,
    UltraHigh,
}

impl QualityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Low => "low",
            QualityLevel::Medium => "medium",
            QualityLevel::High => "high",
            QualityLevel::UltraHigh => "ultra_high",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(QualityLevel::Low),
            "medium" => Ok(QualityLevel::Medium),
            "high" => Ok(QualityLevel::High),
            "ultra_high" | "ultra-high" => Ok(QualityLevel::UltraHigh),
            other => Err(format!("unknown quality level: {}", other)),
        }
    }
}

/// Privacy tier of the request payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyLevel {
    Low,
    #[default]
    Normal,
    High,
}

impl PrivacyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Low => "low",
            PrivacyLevel::Normal => "normal",
            PrivacyLevel::High => "high",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(PrivacyLevel::Low),
            "normal" => Ok(PrivacyLevel::Normal),
            "high" => Ok(PrivacyLevel::High),
            other => Err(format!("unknown privacy level: {}", other)),
        }
    }
}

/// Context keys whose string values take part in keyword matching
const CONTEXT_TEXT_KEYS: [&str; 2] = ["query", "context"];

/// A request with its declared attributes, built once per call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRequest {
    pub task_type: String,
    pub content: String,
    #[serde(default)]
    pub quality_level: QualityLevel,
    #[serde(default)]
    pub privacy_level: PrivacyLevel,
    #[serde(default)]
    pub context: HashMap<String, Value>,
    /// Restrict routing to adapters declaring this capability
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capability: Option<String>,
}

impl ClassifiedRequest {
    pub fn new(task_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            task_type: task_type.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    pub fn with_quality(mut self, quality_level: QualityLevel) -> Self {
        self.quality_level = quality_level;
        self
    }

    pub fn with_privacy(mut self, privacy_level: PrivacyLevel) -> Self {
        self.privacy_level = privacy_level;
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_capability(mut self, capability: impl Into<String>) -> Self {
        self.capability = Some(capability.into());
        self
    }

    /// Case-folded text used for keyword matching
    ///
    /// Joins the task type, the content, and the `query` / `context` string
    /// entries of the context map, in that order.
    pub fn routing_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.task_type.as_str(), self.content.as_str()];
        for key in CONTEXT_TEXT_KEYS {
            if let Some(Value::String(text)) = self.context.get(key) {
                parts.push(text.as_str());
            }
        }

        parts
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    /// Whether the request carries no content to classify
    pub fn has_empty_content(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Parameters handed to the serving sub-component
    pub fn to_params(&self) -> Value {
        serde_json::json!({
            "task_type": self.task_type,
            "content": self.content,
            "quality_level": self.quality_level,
            "privacy_level": self.privacy_level,
            "context": self.context,
        })
    }
}
