pub mod config;
pub mod list;
pub mod row;
pub mod toggle;
pub mod trailer;

use std::sync::Arc;

use anyhow::Result;

use bingebox_core::{
    fetch::{HttpFetcher, TmdbApi},
    AppConfig,
};

/// TMDB client for the configured endpoint and key
pub fn tmdb_api(config: &AppConfig) -> Result<TmdbApi> {
    let fetcher = Arc::new(HttpFetcher::new(config)?);
    Ok(TmdbApi::from_config(fetcher, config)?)
}
