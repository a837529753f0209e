//! Time-boxed in-memory cache of registry documents.
//!
//! Wraps another [`RegistryClient`]; responses are kept per URL for a
//! fixed TTL. Errors are never cached. Nothing is persisted.
//!
//! Expired entries are swept on every store, so the map never holds more
//! than the URLs fetched within the last TTL window.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::debug;

use crate::error::CatalogError;
use crate::registry::RegistryClient;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: serde_json::Value,
    fetched_at: Instant,
}

/// Registry client that memoizes successful responses for `ttl`.
pub struct CachedRegistryClient {
    inner: Arc<dyn RegistryClient>,
    ttl: Duration,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CachedRegistryClient {
    pub fn new(inner: Arc<dyn RegistryClient>, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of cached documents. Stale ones linger until the next store.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drop every cached document.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl RegistryClient for CachedRegistryClient {
    async fn fetch_json(&self, url: &str) -> Result<serde_json::Value, CatalogError> {
        if let Some(entry) = self.entries.read().await.get(url) {
            if entry.fetched_at.elapsed() < self.ttl {
                debug!(url = url, "registry cache hit");
                return Ok(entry.value.clone());
            }
        }

        let value = self.inner.fetch_json(url).await?;
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| entry.fetched_at.elapsed() < self.ttl);
        if entries.len() < before {
            debug!(evicted = before - entries.len(), "registry cache swept");
        }
        entries.insert(
            url.to_string(),
            CacheEntry {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(value)
    }
}
