use std::sync::Arc;

use serde::de::DeserializeOwned;
use url::Url;

use super::client::FetchJson;
use crate::config::AppConfig;
use crate::media::{CatalogRow, MediaItem, MediaKind, Page, Video, VideoList};
use crate::{Error, Result};

/// TMDB v3 endpoints on top of an injected [`FetchJson`]
#[derive(Clone)]
pub struct TmdbApi {
    fetcher: Arc<dyn FetchJson>,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbApi {
    pub fn new(
        fetcher: Arc<dyn FetchJson>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            base_url: base_url.into(),
            api_key: api_key.into(),
            language: "en-US".to_string(),
        }
    }

    pub fn from_config(fetcher: Arc<dyn FetchJson>, config: &AppConfig) -> Result<Self> {
        let api = Self::new(fetcher, config.tmdb.base_url.clone(), config.api_key()?)
            .with_language(config.tmdb.language.clone());
        Ok(api)
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Absolute endpoint URL with `api_key` first, then `params`
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> Result<Url> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("api_key", &self.api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// `GET /{kind}/{id}/videos`
    pub fn videos_url(&self, kind: MediaKind, id: i64) -> Result<Url> {
        self.url(
            &format!("{}/{}/videos", kind.as_path(), id),
            &[("language", self.language.as_str())],
        )
    }

    /// Candidate videos for an item, in provider order
    pub async fn videos(&self, kind: MediaKind, id: i64) -> Result<Vec<Video>> {
        let url = self.videos_url(kind, id)?;
        let list: VideoList = self.get(&url).await?;
        Ok(list.results)
    }

    pub fn row_url(&self, row: CatalogRow) -> Result<Url> {
        let (path, static_params) = row.endpoint();
        let mut params: Vec<(&str, &str)> = static_params;
        if row.localized() {
            params.insert(0, ("language", self.language.as_str()));
        }
        self.url(path, &params)
    }

    /// Items of a browse row
    pub async fn row(&self, row: CatalogRow) -> Result<Vec<MediaItem>> {
        let url = self.row_url(row)?;
        let page: Page<MediaItem> = self.get(&url).await?;
        tracing::debug!(row = row.slug(), count = page.results.len(), "Fetched catalog row");
        Ok(page.results)
    }

    /// `GET /{kind}/{id}`
    pub async fn details(&self, kind: MediaKind, id: i64) -> Result<MediaItem> {
        let url = self.url(
            &format!("{}/{}", kind.as_path(), id),
            &[("language", self.language.as_str())],
        )?;
        let mut item: MediaItem = self.get(&url).await?;
        // Detail payloads carry no media_type; keep the kind we asked for.
        item.media_type.get_or_insert_with(|| kind.as_path().to_string());
        Ok(item)
    }

    async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let value = self.fetcher.fetch_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::Decode(format!("Unexpected response shape from {}: {}", url.path(), e)))
    }
}
