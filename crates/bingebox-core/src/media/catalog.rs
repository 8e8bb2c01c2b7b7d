//! Browse rows and artwork helpers

use std::fmt;
use std::str::FromStr;

use super::models::MediaItem;

const NETFLIX_NETWORK_ID: &str = "213";

/// A horizontally scrolling row on the browse screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogRow {
    NetflixOriginals,
    Trending,
    NewReleases,
    TopRated,
    Action,
    SciFi,
    Thriller,
    Comedy,
    Horror,
    Adventure,
    Animation,
    Romance,
    Family,
    Drama,
    Documentaries,
}

impl CatalogRow {
    /// Rows in the order the browse screen shows them
    pub const BROWSE_ORDER: [CatalogRow; 15] = [
        CatalogRow::NetflixOriginals,
        CatalogRow::Trending,
        CatalogRow::NewReleases,
        CatalogRow::TopRated,
        CatalogRow::Action,
        CatalogRow::SciFi,
        CatalogRow::Thriller,
        CatalogRow::Comedy,
        CatalogRow::Horror,
        CatalogRow::Adventure,
        CatalogRow::Animation,
        CatalogRow::Romance,
        CatalogRow::Family,
        CatalogRow::Drama,
        CatalogRow::Documentaries,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CatalogRow::NetflixOriginals => "Netflix Originals",
            CatalogRow::Trending => "Trending Now",
            CatalogRow::NewReleases => "New Releases",
            CatalogRow::TopRated => "Top Rated",
            CatalogRow::Action => "Action Movies",
            CatalogRow::SciFi => "Sci-Fi & Fantasy",
            CatalogRow::Thriller => "Thriller Movies",
            CatalogRow::Comedy => "Comedy Movies",
            CatalogRow::Horror => "Horror Movies",
            CatalogRow::Adventure => "Adventure",
            CatalogRow::Animation => "Animation",
            CatalogRow::Romance => "Romance Movies",
            CatalogRow::Family => "Family Movies",
            CatalogRow::Drama => "Drama",
            CatalogRow::Documentaries => "Documentaries",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            CatalogRow::NetflixOriginals => "originals",
            CatalogRow::Trending => "trending",
            CatalogRow::NewReleases => "new-releases",
            CatalogRow::TopRated => "top-rated",
            CatalogRow::Action => "action",
            CatalogRow::SciFi => "sci-fi",
            CatalogRow::Thriller => "thriller",
            CatalogRow::Comedy => "comedy",
            CatalogRow::Horror => "horror",
            CatalogRow::Adventure => "adventure",
            CatalogRow::Animation => "animation",
            CatalogRow::Romance => "romance",
            CatalogRow::Family => "family",
            CatalogRow::Drama => "drama",
            CatalogRow::Documentaries => "documentaries",
        }
    }

    /// Rows drawn with tall poster art
    pub fn is_large(&self) -> bool {
        matches!(self, CatalogRow::NetflixOriginals)
    }

    /// Endpoint path and the query parameters besides `api_key`
    ///
    /// Only the fixed-list endpoints ask for a language; discover rows use
    /// the provider default.
    pub fn endpoint(&self) -> (&'static str, Vec<(&'static str, &'static str)>) {
        match self {
            CatalogRow::NetflixOriginals => {
                ("discover/tv", vec![("with_networks", NETFLIX_NETWORK_ID)])
            }
            CatalogRow::Trending => ("trending/all/week", vec![]),
            CatalogRow::NewReleases => ("movie/upcoming", vec![("page", "1")]),
            CatalogRow::TopRated => ("movie/top_rated", vec![]),
            genre_row => (
                "discover/movie",
                vec![("with_genres", genre_row.genre_id().unwrap_or_default())],
            ),
        }
    }

    /// Whether the endpoint takes the configured language
    pub fn localized(&self) -> bool {
        matches!(
            self,
            CatalogRow::Trending | CatalogRow::NewReleases | CatalogRow::TopRated
        )
    }

    fn genre_id(&self) -> Option<&'static str> {
        match self {
            CatalogRow::Action => Some("28"),
            CatalogRow::SciFi => Some("878"),
            CatalogRow::Thriller => Some("53"),
            CatalogRow::Comedy => Some("35"),
            CatalogRow::Horror => Some("27"),
            CatalogRow::Adventure => Some("12"),
            CatalogRow::Animation => Some("16"),
            CatalogRow::Romance => Some("10749"),
            CatalogRow::Family => Some("10751"),
            CatalogRow::Drama => Some("18"),
            CatalogRow::Documentaries => Some("99"),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for CatalogRow {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        CatalogRow::BROWSE_ORDER
            .into_iter()
            .find(|row| row.slug() == wanted)
            .ok_or_else(|| crate::Error::NotFound(format!("catalog row '{}'", s)))
    }
}

/// Items of a row that have artwork to show
pub fn displayable(items: &[MediaItem], large: bool) -> Vec<&MediaItem> {
    items
        .iter()
        .filter(|item| item.artwork_path(large).is_some())
        .collect()
}

/// Full image URL for an artwork path
///
/// Large rows load the original asset, standard rows the w500 rendition.
pub fn image_url(image_base_url: &str, path: &str, large: bool) -> String {
    let size = if large { "original" } else { "w500" };
    format!(
        "{}/{}/{}",
        image_base_url.trim_end_matches('/'),
        size,
        path.trim_start_matches('/')
    )
}
