use anyhow::Result;

use bingebox_core::{
    favorites::FavoritesStore,
    media::{displayable, image_url, CatalogRow, MediaItem},
    storage::open_favorites,
    AppConfig,
};

const MY_LIST_SLUG: &str = "my-list";

pub async fn run(config: &AppConfig, slug: &str) -> Result<()> {
    let (favorites, _) = open_favorites(config).await;

    if slug.trim().eq_ignore_ascii_case(MY_LIST_SLUG) {
        print_row(config, "My List", favorites.items(), false, &favorites);
        return Ok(());
    }

    let row: CatalogRow = slug.parse()?;
    let api = super::tmdb_api(config)?;

    let items = match api.row(row).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Failed to load row '{}': {}", row.slug(), e);
            Vec::new()
        }
    };

    print_row(config, row.title(), &items, row.is_large(), &favorites);
    Ok(())
}

fn print_row(
    config: &AppConfig,
    title: &str,
    items: &[MediaItem],
    large: bool,
    favorites: &FavoritesStore,
) {
    let shown = displayable(items, large);
    println!("{} ({}):\n", title, shown.len());

    if shown.is_empty() {
        println!("  Nothing to show.");
        return;
    }

    for item in shown {
        let marker = if favorites.contains(item.id) { "[+]" } else { "[ ]" };
        println!("  {} {} - {} ({})", marker, item.id, item.display_title(), item.kind());
        if let Some(path) = item.artwork_path(large) {
            println!("      {}", image_url(&config.tmdb.image_base_url, path, large));
        }
    }
}

pub fn list_rows() {
    println!("Rows:\n");
    println!("  {:<16} My List", MY_LIST_SLUG);
    for row in CatalogRow::BROWSE_ORDER {
        println!("  {:<16} {}", row.slug(), row.title());
    }
}
