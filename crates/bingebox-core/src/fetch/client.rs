use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Proxy, StatusCode};
use url::Url;

use crate::config::AppConfig;
use crate::{Error, Result};

const MAX_RETRIES: u32 = 3;
const INITIAL_RETRY_DELAY_MS: u64 = 500;
const CLIENT_USER_AGENT: &str = concat!("bingebox/", env!("CARGO_PKG_VERSION"));

/// "GET a URL and decode its body as JSON"
///
/// Transport failures and non-success statuses surface as
/// [`Error::Network`] or [`Error::Http`]; bodies that are not JSON as
/// [`Error::Decode`].
#[async_trait]
pub trait FetchJson: Send + Sync {
    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value>;
}

/// reqwest-backed [`FetchJson`]
pub struct HttpFetcher {
    client: Client,
    retry_delay: Duration,
}

impl HttpFetcher {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client =
            Self::build_client(config.tmdb.request_timeout_secs, &config.tmdb.proxy_url)?;
        Ok(Self {
            client,
            retry_delay: Duration::from_millis(INITIAL_RETRY_DELAY_MS),
        })
    }

    /// First backoff delay; doubles on each retry
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Build HTTP client with optional proxy
    fn build_client(timeout_secs: u64, proxy_url: &Option<String>) -> Result<Client> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .default_headers(Self::default_headers())
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(ref proxy) = proxy_url {
            let proxy = Proxy::all(proxy)
                .map_err(|e| Error::Config(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
            tracing::info!("Using HTTP proxy for API requests");
        }

        builder.build().map_err(Error::Http)
    }

    fn default_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers
    }

    /// GET with retry and exponential backoff on 429/503
    async fn get_with_retry(&self, url: &Url) -> Result<String> {
        let mut delay = self.retry_delay;

        for attempt in 0..MAX_RETRIES {
            tracing::debug!(attempt = attempt + 1, path = url.path(), "GET");

            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();

            if status == StatusCode::TOO_MANY_REQUESTS || status == StatusCode::SERVICE_UNAVAILABLE
            {
                if attempt + 1 < MAX_RETRIES {
                    tracing::warn!(
                        "Received {} for {}, retrying after {}ms...",
                        status,
                        url.path(),
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    continue;
                }
            }

            if !status.is_success() {
                return Err(Error::Network(format!("HTTP {} for {}", status, url.path())));
            }

            return Ok(response.text().await?);
        }

        Err(Error::Network(format!(
            "Gave up on {} after {} attempts",
            url.path(),
            MAX_RETRIES
        )))
    }
}

#[async_trait]
impl FetchJson for HttpFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value> {
        let body = self.get_with_retry(url).await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Decode(format!("Invalid JSON from {}: {}", url.path(), e)))
    }
}
