use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable that overrides `tmdb.api_key`
pub const API_KEY_ENV: &str = "TMDB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub trailer: TrailerConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub favorites: FavoritesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    /// TMDB v3 API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// API base URL
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
    /// Image CDN base URL (size segment is appended)
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// Response language
    #[serde(default = "default_language")]
    pub language: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_tmdb_base_url(),
            image_base_url: default_image_base_url(),
            language: default_language(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrailerConfig {
    /// Video host a candidate must come from
    #[serde(default = "default_video_site")]
    pub video_site: String,
    /// Accepted video categories
    #[serde(default = "default_video_types")]
    pub video_types: Vec<String>,
    /// Prefix joined with the video key to build a playable URL
    #[serde(default = "default_watch_url_base")]
    pub watch_url_base: String,
}

impl Default for TrailerConfig {
    fn default() -> Self {
        Self {
            video_site: default_video_site(),
            video_types: default_video_types(),
            watch_url_base: default_watch_url_base(),
        }
    }
}

/// Easing curve used by the scroll animator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    Cubic,
    /// 1 - (1-t)^4
    #[default]
    Quartic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate scroll changes instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of a paging animation
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate of the frame driver
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Share of the viewport moved by one page step
    #[serde(default = "default_page_fraction")]
    pub page_fraction: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
            page_fraction: default_page_fraction(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Key the list is persisted under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bingebox")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_video_site() -> String {
    "YouTube".to_string()
}

fn default_video_types() -> Vec<String> {
    vec!["Trailer".to_string(), "Teaser".to_string()]
}

fn default_watch_url_base() -> String {
    "https://www.youtube.com/watch?v=".to_string()
}

fn default_animation_duration() -> u64 {
    500
}

fn default_animation_fps() -> u32 {
    60
}

fn default_page_fraction() -> f64 {
    0.5 // half a viewport per step
}

fn default_storage_key() -> String {
    crate::favorites::DEFAULT_STORAGE_KEY.to_string()
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.tmdb.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/bingebox/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("bingebox")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("bingebox.db")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// API key, or a configuration error naming where to set it
    pub fn api_key(&self) -> crate::Result<&str> {
        self.tmdb
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                crate::Error::Config(format!(
                    "TMDB API key missing: set [tmdb] api_key in {} or the {} environment variable",
                    Self::config_path().display(),
                    API_KEY_ENV
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.tmdb.language, "en-US");
        assert_eq!(config.trailer.video_site, "YouTube");
        assert_eq!(config.trailer.video_types, vec!["Trailer", "Teaser"]);
        assert_eq!(config.scroll.animation_duration_ms, 500);
        assert_eq!(config.scroll.easing, EasingType::Quartic);
        assert_eq!(config.favorites.storage_key, "bingebox-my-list");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [scroll]
            easing = "cubic"
            page_fraction = 1.0

            [tmdb]
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.easing, EasingType::Cubic);
        assert_eq!(config.scroll.page_fraction, 1.0);
        assert!(config.scroll.smooth_enabled);
        assert_eq!(config.api_key().unwrap(), "abc");
        assert_eq!(config.tmdb.request_timeout_secs, 30);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[scroll]\neasing = 3").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_missing_api_key() {
        let config = AppConfig::default();
        assert!(config.api_key().is_err());
    }

    #[test]
    fn test_tilde_expansion() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde(std::path::Path::new("~/data")), home.join("data"));
        }
        assert_eq!(
            expand_tilde(std::path::Path::new("/tmp/data")),
            PathBuf::from("/tmp/data")
        );
    }
}
