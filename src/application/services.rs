//! AppServices - the collaborators a front end needs, built from config.

use std::sync::Arc;

use super::session_manager::SessionManager;
use crate::adapters::advice::{AiAdviceService, StaticAdviceService};
use crate::adapters::ai::GeminiProvider;
use crate::adapters::storage::{InMemoryPersistence, JsonFilePersistence};
use crate::config::{AppConfig, ConfigError, StorageBackend};
use crate::domain::progression::ProgressionEngine;
use crate::ports::{AdviceService, PersistenceGateway};

/// Shared dependencies of the application.
#[derive(Clone)]
pub struct AppServices {
    pub gateway: Arc<dyn PersistenceGateway>,
    pub advice: Arc<dyn AdviceService>,
    pub engine: ProgressionEngine,
}

impl AppServices {
    pub fn new(
        gateway: Arc<dyn PersistenceGateway>,
        advice: Arc<dyn AdviceService>,
        engine: ProgressionEngine,
    ) -> Self {
        Self {
            gateway,
            advice,
            engine,
        }
    }

    /// Wires storage, advice and engine from a validated configuration.
    ///
    /// Without a Gemini key the advice falls back to fixed texts.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let gateway: Arc<dyn PersistenceGateway> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(InMemoryPersistence::new()),
            StorageBackend::File => {
                let store = JsonFilePersistence::new(&config.storage.data_dir);
                match config.storage.quota_bytes {
                    Some(quota) => Arc::new(store.with_quota(quota)),
                    None => Arc::new(store),
                }
            }
        };

        let advice: Arc<dyn AdviceService> = match config.ai.gemini_config() {
            Some(gemini) => {
                let provider =
                    GeminiProvider::new(gemini).map_err(|e| ConfigError::AiSetup(e.to_string()))?;
                Arc::new(AiAdviceService::new(Arc::new(provider)))
            }
            None => {
                tracing::info!("no Gemini API key configured, using fixed advice texts");
                Arc::new(StaticAdviceService::new())
            }
        };

        Ok(Self::new(gateway, advice, config.progression.engine()))
    }

    pub fn session_manager(&self) -> SessionManager {
        SessionManager::new(self.gateway.clone(), self.engine)
    }
}
