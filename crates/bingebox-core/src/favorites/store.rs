use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::watch;

use super::durable::DurableStore;
use crate::media::MediaItem;

/// Result of a [`FavoritesStore::toggle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Added,
    Removed,
}

/// Ordered list of saved titles with write-through persistence
///
/// Insertion order is kept and each id appears at most once. Every toggle
/// writes the whole list back to the durable store, then publishes the new
/// snapshot to subscribers. The in-memory list stays authoritative when a
/// write fails.
pub struct FavoritesStore {
    items: Vec<MediaItem>,
    store: Arc<dyn DurableStore>,
    key: String,
    snapshot: watch::Sender<Arc<[MediaItem]>>,
    last_write_error: Option<String>,
}

impl FavoritesStore {
    /// Load the persisted list. Never fails: unreadable or corrupt data
    /// yields an empty list.
    pub async fn initialize(store: Arc<dyn DurableStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let items = match store.get(&key).await {
            Ok(Some(raw)) => decode(&key, &raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read saved list '{}': {}", key, e);
                Vec::new()
            }
        };

        tracing::debug!("Loaded {} saved titles from '{}'", items.len(), key);

        let initial: Arc<[MediaItem]> = Arc::from(items.clone());
        let (snapshot, _) = watch::channel(initial);
        Self {
            items,
            store,
            key,
            snapshot,
            last_write_error: None,
        }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn contains(&self, id: i64) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read-only view that updates after every toggle
    pub fn subscribe(&self) -> watch::Receiver<Arc<[MediaItem]>> {
        self.snapshot.subscribe()
    }

    /// Error from the most recent write, cleared by the next successful one
    pub fn last_write_error(&self) -> Option<&str> {
        self.last_write_error.as_deref()
    }

    /// Remove `item` if an entry with its id is saved, otherwise append it
    pub async fn toggle(&mut self, item: MediaItem) -> Membership {
        let membership = match self.items.iter().position(|saved| saved.id == item.id) {
            Some(index) => {
                self.items.remove(index);
                Membership::Removed
            }
            None => {
                self.items.push(item);
                Membership::Added
            }
        };

        self.persist().await;
        self.snapshot.send_replace(Arc::from(self.items.clone()));

        membership
    }

    async fn persist(&mut self) {
        let encoded = match serde_json::to_string(&self.items) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Failed to encode saved list: {}", e);
                self.last_write_error = Some(e.to_string());
                return;
            }
        };

        match self.store.set(&self.key, &encoded).await {
            Ok(()) => self.last_write_error = None,
            Err(e) => {
                tracing::warn!("Failed to save list '{}': {}", self.key, e);
                self.last_write_error = Some(e.to_string());
            }
        }
    }
}

/// Decode a persisted list, dropping repeated ids
fn decode(key: &str, raw: &str) -> Vec<MediaItem> {
    let items: Vec<MediaItem> = match serde_json::from_str(raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Discarding unreadable saved list '{}': {}", key, e);
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(item.id)).collect()
}
