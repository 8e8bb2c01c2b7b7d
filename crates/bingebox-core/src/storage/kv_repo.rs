use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::Database;
use crate::config::AppConfig;
use crate::favorites::{DurableStore, FavoritesStore, MemoryStore};
use crate::Result;

/// String values keyed by name, one row per key
#[derive(Clone)]
pub struct KvRepository {
    db: Database,
}

impl KvRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read a value
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get("value")))
    }

    /// Insert or replace a value
    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// When a key was last written
    pub async fn updated_at(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT updated_at FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(self.db.pool())
            .await?;

        Ok(row.map(|r| r.get("updated_at")))
    }
}

#[async_trait]
impl DurableStore for KvRepository {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        KvRepository::get(self, key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        KvRepository::set(self, key, value).await
    }
}

/// My List backed by the database in the data dir
///
/// If the database cannot be opened the list lives in memory for this run
/// and no repository is returned.
pub async fn open_favorites(config: &AppConfig) -> (FavoritesStore, Option<KvRepository>) {
    let key = config.favorites.storage_key.clone();

    match Database::new(config).await {
        Ok(db) => {
            let repo = KvRepository::new(db);
            let favorites = FavoritesStore::initialize(Arc::new(repo.clone()), key).await;
            (favorites, Some(repo))
        }
        Err(e) => {
            tracing::warn!("Failed to open database, My List will not be saved: {}", e);
            let favorites = FavoritesStore::initialize(Arc::new(MemoryStore::new()), key).await;
            (favorites, None)
        }
    }
}
