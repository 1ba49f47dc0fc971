use crate::store::KeyValueStore;
use anyhow::Result;
use async_trait::async_trait;
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;
use tracing::debug;

/// Fjall-backed store persisting the session between runs.
pub struct DiskStore {
    // The keyspace owns the journal the partition writes through.
    _keyspace: Keyspace,
    partition: PartitionHandle,
}

impl DiskStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path).open()?;
        let partition = keyspace.open_partition("session", PartitionCreateOptions::default())?;
        Ok(Self {
            _keyspace: keyspace,
            partition,
        })
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get(&self, key: &str) -> Option<String> {
        match self.partition.get(key) {
            Ok(Some(raw)) => {
                debug!("Session HIT for key: {key}");
                String::from_utf8(raw.to_vec()).ok()
            }
            Ok(None) => {
                debug!("Session MISS for key: {key}");
                None
            }
            Err(e) => {
                debug!("DiskStore get error: {e}");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: String) {
        debug!("Session PUT for key: {key}");
        if let Err(e) = self.partition.insert(key, value.as_bytes()) {
            debug!("DiskStore put error: {e}");
        }
    }

    async fn remove(&self, key: &str) {
        debug!("Session REMOVE for key: {key}");
        if let Err(e) = self.partition.remove(key) {
            debug!("DiskStore remove error: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_get_set() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();

        assert!(store.get("key1").await.is_none());

        store.set("key1", "value1".to_string()).await;
        assert_eq!(store.get("key1").await.as_deref(), Some("value1"));
    }

    #[tokio::test]
    async fn test_remove() {
        let dir = tempdir().unwrap();
        let store = DiskStore::open(dir.path()).unwrap();

        store.set("key1", "value1".to_string()).await;
        store.remove("key1").await;
        assert!(store.get("key1").await.is_none());
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskStore::open(dir.path()).unwrap();
            store.set("key1", "value1".to_string()).await;
        }

        let store = DiskStore::open(dir.path()).unwrap();
        assert_eq!(store.get("key1").await.as_deref(), Some("value1"));
    }
}
