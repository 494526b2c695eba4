//! Application state shared across handlers

use std::sync::Arc;

use application::{FareService, MessageCatalog};
use infrastructure::AppConfig;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Fare quoting service
    pub fare_service: Arc<FareService>,
    /// Default failure texts, overridable per request
    pub messages: Arc<MessageCatalog>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create state with the built-in English failure texts
    pub fn new(fare_service: FareService, config: AppConfig) -> Self {
        Self {
            fare_service: Arc::new(fare_service),
            messages: Arc::new(MessageCatalog::english()),
            config: Arc::new(config),
        }
    }
}
