//! Key-value persistence for the resume snapshot.
//!
//! One slot under a fixed key holds the latest JSON snapshot. Backends plug in
//! through [`SnapshotStore`] and are carried in `AppState` as
//! `Arc<dyn SnapshotStore>`.

use std::path::PathBuf;

use async_trait::async_trait;
use redis::AsyncCommands;
use thiserror::Error;
use tokio::sync::RwLock;

/// The slot every backend reads and writes.
pub const STORAGE_KEY: &str = "resumeData";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Which backend this is, for logs and health output.
    fn backend(&self) -> &'static str;

    /// The stored snapshot, or `None` when the slot is empty.
    async fn load(&self) -> Result<Option<String>, StoreError>;

    async fn save(&self, snapshot: &str) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-process memory
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    slot: RwLock<Option<String>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot.read().await.clone())
    }

    async fn save(&self, snapshot: &str) -> Result<(), StoreError> {
        *self.slot.write().await = Some(snapshot.to_string());
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis
// ────────────────────────────────────────────────────────────────────────────

pub struct RedisSnapshotStore {
    client: redis::Client,
}

impl RedisSnapshotStore {
    /// Opening only validates the URL; no connection is made until first use.
    pub fn open(url: &str) -> Result<Self, StoreError> {
        Ok(Self {
            client: redis::Client::open(url)?,
        })
    }
}

#[async_trait]
impl SnapshotStore for RedisSnapshotStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(STORAGE_KEY).await?;
        Ok(value)
    }

    async fn save(&self, snapshot: &str) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set::<_, _, ()>(STORAGE_KEY, snapshot).await?;
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// JSON file in a directory
// ────────────────────────────────────────────────────────────────────────────

pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Stores the slot as `<dir>/resumeData.json`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(format!("{STORAGE_KEY}.json")),
        }
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    fn backend(&self) -> &'static str {
        "file"
    }

    async fn load(&self) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, snapshot: &str) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        // The slot is never observed half-written.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, snapshot).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = MemorySnapshotStore::new();
        assert_eq!(store.load().await.unwrap(), None);
        store.save("{}").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_memory_store_overwrites_slot() {
        let store = MemorySnapshotStore::new();
        store.save("{\"summary\":\"a\"}").await.unwrap();
        store.save("{\"summary\":\"b\"}").await.unwrap();
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("{\"summary\":\"b\"}")
        );
    }

    #[tokio::test]
    async fn test_file_store_missing_slot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path());
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSnapshotStore::new(dir.path().join("nested"));
        store.save("{\"skills\":[\"Go\"]}").await.unwrap();
        assert_eq!(
            store.load().await.unwrap().as_deref(),
            Some("{\"skills\":[\"Go\"]}")
        );
        assert!(dir.path().join("nested").join("resumeData.json").exists());
    }

    #[test]
    fn test_redis_store_rejects_bad_url() {
        assert!(RedisSnapshotStore::open("not a url").is_err());
        assert!(RedisSnapshotStore::open("redis://127.0.0.1:6379").is_ok());
    }
}
