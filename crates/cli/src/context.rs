//! Shared wiring for every command: config, durable local store, API client,
//! auth session, and the session-scoped profile slot.

use std::sync::Arc;

use gearcart_client::{ApiClient, HttpCartBackend, HttpWishlistBackend};
use gearcart_core::config::AppConfig;
use gearcart_core::{
    AuthSession, CartManager, FileStore, KeyValueStore, MemoryStore, SessionProfileStore,
    WishlistManager,
};

pub struct AppContext {
    pub config: AppConfig,
    pub store: Arc<dyn KeyValueStore>,
    pub session_store: Arc<dyn KeyValueStore>,
    pub client: ApiClient,
    pub session: AuthSession,
}

impl AppContext {
    pub fn build(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.storage.path));
        Self::with_store(config, store)
    }

    /// Same wiring against an injected store; the test seam.
    pub fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api)?;
        let session = AuthSession::new(Arc::clone(&store));
        if let Some(token) = session.token() {
            client.set_token(token);
        }
        Ok(Self {
            config,
            store,
            session_store: Arc::new(MemoryStore::default()),
            client,
            session,
        })
    }

    pub async fn cart(&self) -> CartManager {
        CartManager::open(
            Arc::clone(&self.store),
            Arc::new(HttpCartBackend::new(self.client.clone())),
        )
        .await
    }

    pub async fn wishlist(&self) -> WishlistManager {
        WishlistManager::open(
            Arc::clone(&self.store),
            Arc::new(HttpWishlistBackend::new(self.client.clone())),
        )
        .await
    }

    pub fn profile_slot(&self) -> SessionProfileStore {
        SessionProfileStore::new(Arc::clone(&self.session_store))
    }
}
