//! Status aggregator configuration

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Routing decisions kept for diagnostics (oldest evicted first)
    #[serde(default = "default_decision_log_capacity")]
    pub decision_log_capacity: usize,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            decision_log_capacity: default_decision_log_capacity(),
        }
    }
}
