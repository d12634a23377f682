use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur with key-value store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Key prefix shared by every entry this service writes
const NAMESPACE: &str = "hub";

/// Get/set/delete/clear by string key.
///
/// Values are JSON. The in-process tier (moka) always holds what was
/// written; when a Redis URL is configured every write also goes to
/// Redis, which survives restarts and is shared across instances.
/// Clones share both tiers.
#[derive(Clone)]
pub struct KvStore {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Vec<u8>>,
}

impl KvStore {
    /// Process-local store; contents are lost on exit
    pub fn in_memory(capacity: u64) -> Self {
        Self {
            redis: None,
            l1_cache: moka::future::CacheBuilder::new(capacity).build(),
        }
    }

    /// Store backed by Redis
    pub async fn with_redis(redis_url: &str, capacity: u64) -> Result<Self, StoreError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            l1_cache: moka::future::CacheBuilder::new(capacity).build(),
        })
    }

    pub fn is_persistent(&self) -> bool {
        self.redis.is_some()
    }

    /// Get a value (L1 first, then Redis)
    pub async fn get<T>(&self, key: &str) -> Result<Option<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        if let Some(bytes) = self.l1_cache.get(key).await {
            tracing::trace!("L1 store hit: {}", key);
            return Ok(Some(serde_json::from_slice(&bytes)?));
        }

        let Some(remote) = &self.redis else {
            tracing::trace!("Store miss: {}", key);
            return Ok(None);
        };

        let mut conn = remote.lock().await;
        let value: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut *conn)
            .await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("Redis store hit: {}", key);
                self.l1_cache
                    .insert(key.to_string(), json.as_bytes().to_vec())
                    .await;
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => {
                tracing::trace!("Store miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Set a value in both tiers
    pub async fn set<T>(&self, key: &str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize,
    {
        let json = serde_json::to_string(value)?;

        self.l1_cache
            .insert(key.to_string(), json.as_bytes().to_vec())
            .await;

        if let Some(remote) = &self.redis {
            let mut conn = remote.lock().await;
            let _: () = redis::cmd("SET")
                .arg(key)
                .arg(json)
                .query_async(&mut *conn)
                .await?;
        }

        tracing::trace!("Store set: {}", key);
        Ok(())
    }

    /// Delete a value from both tiers
    pub async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.l1_cache.invalidate(key).await;

        if let Some(remote) = &self.redis {
            let mut conn = remote.lock().await;
            let _: () = redis::cmd("DEL").arg(key).query_async(&mut *conn).await?;
        }
        Ok(())
    }

    /// Remove every entry under the service namespace
    pub async fn clear(&self) -> Result<(), StoreError> {
        self.l1_cache.invalidate_all();

        if let Some(remote) = &self.redis {
            let pattern = format!("{}:*", NAMESPACE);
            let mut conn = remote.lock().await;
            let keys: Vec<String> = redis::cmd("KEYS")
                .arg(&pattern)
                .query_async(&mut *conn)
                .await?;

            if !keys.is_empty() {
                let _: () = redis::cmd("DEL").arg(keys).query_async(&mut *conn).await?;
            }
            tracing::debug!("Cleared store pattern: {}", pattern);
        }
        Ok(())
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            l1_size: self.l1_cache.entry_count(),
            persistent: self.is_persistent(),
        }
    }
}

/// Store statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub l1_size: u64,
    pub persistent: bool,
}

/// Store key builder
pub struct StoreKey;

impl StoreKey {
    /// Connection requests and established connections
    pub fn connections() -> String {
        format!("{}:connections", NAMESPACE)
    }

    /// Declared preferences of every viewer
    pub fn viewer_preferences() -> String {
        format!("{}:viewers", NAMESPACE)
    }
}
