pub mod disk;
pub mod memory;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use tracing::debug;

// Well-known session keys.
pub const COST_INPUTS: &str = "cost_inputs";
pub const PRICING_INPUTS: &str = "pricing_inputs";
pub const CURRENCY: &str = "currency";
pub const ACTIVE_VIEW: &str = "active_view";

/// A string-keyed store for persisted session state.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
    async fn remove(&self, key: &str);
}

/// Typed access to the session state carried between runs.
///
/// Entries load on start with a caller-supplied default and are written back
/// after every change; they never expire. The calculation core knows nothing
/// about this type.
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Session { store }
    }

    pub async fn load_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.store.get(key).await {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    debug!("Discarding unreadable session entry {key}: {e}");
                    default
                }
            },
            None => default,
        }
    }

    pub async fn save<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.store.set(key, raw).await,
            Err(e) => debug!("Failed to serialize session entry {key}: {e}"),
        }
    }
}
