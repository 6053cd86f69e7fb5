pub mod disk;
pub mod memory;

use crate::core::history::{ConversionHistory, Favorites};
use anyhow::{Context, Result};
use async_trait::async_trait;
use disk::DiskCollection;
use memory::MemoryCollection;
use serde::{Serialize, de::DeserializeOwned};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

pub const HISTORY_KEY: &str = "conversion-history";
pub const FAVORITES_KEY: &str = "favorite-currencies";

#[async_trait]
pub trait KeyValueCollection: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Conversion history and favorites, stored as JSON under well-known keys.
pub struct ClientState {
    collection: Arc<dyn KeyValueCollection>,
}

impl ClientState {
    pub fn new(collection: Arc<dyn KeyValueCollection>) -> Self {
        Self { collection }
    }

    /// Opens the on-disk state under `data_path/state`.
    pub fn open(data_path: &Path) -> Result<Self> {
        let collection = DiskCollection::open(&data_path.join("state"), "client")?;
        Ok(Self::new(Arc::new(collection)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryCollection::new()))
    }

    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        let Some(bytes) = self.collection.get(key).await? else {
            debug!("No stored value for {}, using default", key);
            return Ok(T::default());
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable stored value for {}", key);
                Ok(T::default())
            }
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)
            .with_context(|| format!("Failed to serialize value for {key}"))?;
        self.collection.put(key, bytes).await
    }

    pub async fn history(&self) -> Result<ConversionHistory> {
        self.load(HISTORY_KEY).await
    }

    pub async fn save_history(&self, history: &ConversionHistory) -> Result<()> {
        self.save(HISTORY_KEY, history).await
    }

    /// Drops the stored history; the next load yields an empty one.
    pub async fn clear_history(&self) -> Result<()> {
        self.collection.remove(HISTORY_KEY).await
    }

    pub async fn favorites(&self) -> Result<Favorites> {
        self.load(FAVORITES_KEY).await
    }

    pub async fn save_favorites(&self, favorites: &Favorites) -> Result<()> {
        self.save(FAVORITES_KEY, favorites).await
    }
}
