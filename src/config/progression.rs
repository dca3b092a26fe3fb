//! Progression engine configuration

use serde::Deserialize;

use crate::domain::progression::{ProgressionEngine, UnknownAlertActionPolicy};

/// Progression engine configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProgressionConfig {
    /// What to do with alert action tokens the engine does not know
    #[serde(default)]
    pub unknown_alert_action: UnknownAlertActionPolicy,
}

impl ProgressionConfig {
    /// Engine built from this configuration
    pub fn engine(&self) -> ProgressionEngine {
        ProgressionEngine::new(self.unknown_alert_action)
    }
}
