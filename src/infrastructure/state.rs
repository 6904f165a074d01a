//! Shared application state

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::application::services::CharacterStore;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::subscriptions::SubscriptionManager;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Owner of all character sheet aggregates; publishes mutation events
    pub store: CharacterStore,
    /// Active per-character update channels, shared with the store
    pub subscriptions: Arc<RwLock<SubscriptionManager>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let subscriptions = Arc::new(RwLock::new(SubscriptionManager::new()));
        Self {
            config,
            store: CharacterStore::new(Arc::clone(&subscriptions)),
            subscriptions,
        }
    }
}
