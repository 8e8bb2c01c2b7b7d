use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which video-lookup endpoint family an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Tv,
}

impl MediaKind {
    /// Path segment used by the TMDB API
    pub fn as_path(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Tv => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

impl FromStr for MediaKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "tv" | "show" => Ok(MediaKind::Tv),
            other => Err(crate::Error::Other(format!(
                "Unknown media kind '{}', expected 'movie' or 'tv'",
                other
            ))),
        }
    }
}

/// A movie or show as returned by catalog endpoints
///
/// Display fields are carried verbatim and never interpreted by the engines;
/// `id` is the only identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<String>,
}

impl MediaItem {
    /// Bare item with only an identity and a kind hint
    pub fn new(id: i64, kind: MediaKind) -> Self {
        Self {
            id,
            media_type: Some(kind.as_path().to_string()),
            title: None,
            name: None,
            original_name: None,
            overview: None,
            poster_path: None,
            backdrop_path: None,
            release_date: None,
            first_air_date: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shows are tagged `tv` by multi-type endpoints; discover results only
    /// carry a first air date.
    pub fn kind(&self) -> MediaKind {
        let tagged_tv = self.media_type.as_deref() == Some("tv");
        let has_air_date = self
            .first_air_date
            .as_deref()
            .is_some_and(|date| !date.is_empty());

        if tagged_tv || has_air_date {
            MediaKind::Tv
        } else {
            MediaKind::Movie
        }
    }

    pub fn display_title(&self) -> &str {
        [&self.title, &self.name, &self.original_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|t| !t.is_empty())
            .unwrap_or("(untitled)")
    }

    /// Artwork shown for this item in a row, if any
    ///
    /// Large rows need a poster; standard rows prefer the backdrop and fall
    /// back to the poster.
    pub fn artwork_path(&self, large: bool) -> Option<&str> {
        let poster = self.poster_path.as_deref().filter(|p| !p.is_empty());
        if large {
            poster
        } else {
            self.backdrop_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .or(poster)
        }
    }
}

/// One entry of a `/{kind}/{id}/videos` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub video_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// A page of list results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_detection() {
        let tagged: MediaItem =
            serde_json::from_str(r#"{"id": 1, "media_type": "tv", "name": "Show"}"#).unwrap();
        assert_eq!(tagged.kind(), MediaKind::Tv);

        let aired: MediaItem =
            serde_json::from_str(r#"{"id": 2, "first_air_date": "2011-04-17"}"#).unwrap();
        assert_eq!(aired.kind(), MediaKind::Tv);

        let movie: MediaItem =
            serde_json::from_str(r#"{"id": 3, "title": "Film", "release_date": "1999-10-15"}"#)
                .unwrap();
        assert_eq!(movie.kind(), MediaKind::Movie);

        let empty_air_date: MediaItem =
            serde_json::from_str(r#"{"id": 4, "first_air_date": ""}"#).unwrap();
        assert_eq!(empty_air_date.kind(), MediaKind::Movie);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let item: MediaItem = serde_json::from_str(
            r#"{"id": 550, "title": "Fight Club", "vote_average": 8.4, "genre_ids": [18]}"#,
        )
        .unwrap();
        assert_eq!(item.id, 550);
        assert_eq!(item.display_title(), "Fight Club");
    }

    #[test]
    fn test_display_title_fallbacks() {
        let mut item = MediaItem::new(1, MediaKind::Tv);
        assert_eq!(item.display_title(), "(untitled)");
        item.original_name = Some("Original".into());
        assert_eq!(item.display_title(), "Original");
        item.name = Some("Name".into());
        assert_eq!(item.display_title(), "Name");
    }

    #[test]
    fn test_artwork_path() {
        let mut item = MediaItem::new(1, MediaKind::Movie);
        assert_eq!(item.artwork_path(false), None);

        item.poster_path = Some("/poster.jpg".into());
        assert_eq!(item.artwork_path(true), Some("/poster.jpg"));
        assert_eq!(item.artwork_path(false), Some("/poster.jpg"));

        item.backdrop_path = Some("/backdrop.jpg".into());
        assert_eq!(item.artwork_path(false), Some("/backdrop.jpg"));

        item.poster_path = None;
        assert_eq!(item.artwork_path(true), None);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("movie".parse::<MediaKind>().unwrap(), MediaKind::Movie);
        assert_eq!("TV".parse::<MediaKind>().unwrap(), MediaKind::Tv);
        assert!("person".parse::<MediaKind>().is_err());
    }

    #[test]
    fn test_video_list_without_results() {
        let list: VideoList = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert!(list.results.is_empty());
    }
}
