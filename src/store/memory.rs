use crate::store::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory store backing a throwaway session.
pub struct MemoryStore {
    inner: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Option<String> {
        let entries = self.inner.lock().await;
        let value = entries.get(key).cloned();
        if value.is_some() {
            debug!("Session HIT for key: {key}");
        } else {
            debug!("Session MISS for key: {key}");
        }
        value
    }

    async fn set(&self, key: &str, value: String) {
        let mut entries = self.inner.lock().await;
        debug!("Session PUT for key: {key}");
        entries.insert(key.to_string(), value);
    }

    async fn remove(&self, key: &str) {
        let mut entries = self.inner.lock().await;
        entries.remove(key);
        debug!("Session REMOVE for key: {key}");
    }
}
