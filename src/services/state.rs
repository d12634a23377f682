use crate::core::{ConnectionBook, ConnectionError};
use crate::models::{ConnectionRequest, ConnectionStatus, ViewerPreferences};
use crate::services::store::{KvStore, StoreError, StoreKey, StoreStats};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Application state shared by the handlers.
///
/// Loaded from the key-value store once at startup and written back
/// after every mutation and once more at shutdown.
pub struct HubState {
    store: KvStore,
    connections: RwLock<ConnectionBook>,
    viewers: RwLock<HashMap<String, ViewerPreferences>>,
}

impl HubState {
    /// Read persisted state; missing keys start empty
    pub async fn load(store: KvStore) -> Result<Self, StoreError> {
        let connections: ConnectionBook = store
            .get(&StoreKey::connections())
            .await?
            .unwrap_or_default();
        let viewers: HashMap<String, ViewerPreferences> = store
            .get(&StoreKey::viewer_preferences())
            .await?
            .unwrap_or_default();

        tracing::info!(
            "Loaded hub state ({} viewer preference sets, persistent store: {})",
            viewers.len(),
            store.is_persistent()
        );

        Ok(Self {
            store,
            connections: RwLock::new(connections),
            viewers: RwLock::new(viewers),
        })
    }

    /// Write everything back to the store
    pub async fn save(&self) -> Result<(), StoreError> {
        let connections = self.connections.read().await;
        self.store.set(&StoreKey::connections(), &*connections).await?;
        drop(connections);

        let viewers = self.viewers.read().await;
        self.store.set(&StoreKey::viewer_preferences(), &*viewers).await?;

        tracing::debug!("Saved hub state");
        Ok(())
    }

    pub fn store_stats(&self) -> StoreStats {
        self.store.stats()
    }

    async fn persist_connections(&self, book: &ConnectionBook) {
        if let Err(e) = self.store.set(&StoreKey::connections(), book).await {
            tracing::warn!("Connection state changed but could not be persisted: {}", e);
        }
    }

    pub async fn preferences(&self, viewer_id: &str) -> Option<ViewerPreferences> {
        self.viewers.read().await.get(viewer_id).cloned()
    }

    pub async fn set_preferences(&self, viewer_id: &str, preferences: ViewerPreferences) {
        let mut viewers = self.viewers.write().await;
        viewers.insert(viewer_id.to_string(), preferences);

        if let Err(e) = self.store.set(&StoreKey::viewer_preferences(), &*viewers).await {
            tracing::warn!("Viewer preferences updated but could not be persisted: {}", e);
        }
    }

    pub async fn connection_status(&self, viewer_id: &str, target_id: &str) -> ConnectionStatus {
        self.connections.read().await.status(viewer_id, target_id)
    }

    pub async fn request_connection(
        &self,
        viewer_id: &str,
        target_id: &str,
        message: &str,
    ) -> Result<ConnectionRequest, ConnectionError> {
        let mut book = self.connections.write().await;
        let request = book.request(viewer_id, target_id, message)?.clone();
        self.persist_connections(&book).await;
        Ok(request)
    }

    pub async fn approve_connection(
        &self,
        actor_id: &str,
        viewer_id: &str,
        target_id: &str,
    ) -> Result<ConnectionRequest, ConnectionError> {
        let mut book = self.connections.write().await;
        let request = book.approve(actor_id, viewer_id, target_id)?.clone();
        self.persist_connections(&book).await;
        Ok(request)
    }

    pub async fn reject_connection(
        &self,
        actor_id: &str,
        viewer_id: &str,
        target_id: &str,
    ) -> Result<ConnectionRequest, ConnectionError> {
        let mut book = self.connections.write().await;
        let request = book.reject(actor_id, viewer_id, target_id)?.clone();
        self.persist_connections(&book).await;
        Ok(request)
    }

    /// Connected users and pending inbound requests of `user_id`
    pub async fn connections_of(&self, user_id: &str) -> (Vec<String>, Vec<ConnectionRequest>) {
        let book = self.connections.read().await;
        (book.connected(user_id), book.pending_for(user_id))
    }

    /// Drop all persisted and in-memory state
    pub async fn reset(&self) -> Result<(), StoreError> {
        *self.connections.write().await = ConnectionBook::new();
        self.viewers.write().await.clear();
        self.store.clear().await
    }
}
