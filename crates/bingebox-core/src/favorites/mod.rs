//! The user's saved "My List"

mod durable;
mod store;

pub use durable::{DurableStore, MemoryStore};
pub use store::{FavoritesStore, Membership};

/// Storage key the list is persisted under
pub const DEFAULT_STORAGE_KEY: &str = "bingebox-my-list";
