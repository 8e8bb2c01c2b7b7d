use anyhow::Result;

use bingebox_core::{
    favorites::Membership,
    media::{MediaItem, MediaKind},
    storage::open_favorites,
    AppConfig,
};

pub async fn run(config: &AppConfig, kind: MediaKind, id: i64, title: Option<String>) -> Result<()> {
    let (mut favorites, repo) = open_favorites(config).await;

    let item = match favorites.items().iter().find(|saved| saved.id == id) {
        Some(saved) => saved.clone(),
        None => resolve(config, kind, id, title).await,
    };

    match favorites.toggle(item.clone()).await {
        Membership::Added => println!("Added '{}' to My List", item.display_title()),
        Membership::Removed => println!("Removed '{}' from My List", item.display_title()),
    }

    if repo.is_none() {
        println!("Warning: the database is unavailable, the change was not saved");
    } else if let Some(err) = favorites.last_write_error() {
        println!("Warning: the change was not saved: {}", err);
    }

    Ok(())
}

/// Item to store for a title that is not saved yet
async fn resolve(config: &AppConfig, kind: MediaKind, id: i64, title: Option<String>) -> MediaItem {
    if let Some(title) = title {
        return MediaItem::new(id, kind).with_title(title);
    }

    let details = match super::tmdb_api(config) {
        Ok(api) => api.details(kind, id).await.map_err(anyhow::Error::from),
        Err(e) => Err(e),
    };

    match details {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!("Could not fetch details for {} {}: {}", kind, id, e);
            MediaItem::new(id, kind)
        }
    }
}
