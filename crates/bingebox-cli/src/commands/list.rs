use anyhow::Result;

use bingebox_core::{storage::open_favorites, AppConfig};

pub async fn run(config: &AppConfig) -> Result<()> {
    let (favorites, repo) = open_favorites(config).await;

    if favorites.is_empty() {
        println!("My List is empty.");
        println!("\nTo add a title, run:");
        println!("  bingebox toggle --kind movie --id <id>");
        return Ok(());
    }

    println!("My List ({}):\n", favorites.len());

    for item in favorites.items() {
        let year = item
            .release_date
            .as_deref()
            .or(item.first_air_date.as_deref())
            .and_then(|date| date.get(..4))
            .map(|year| format!(" ({})", year))
            .unwrap_or_default();

        println!("  {} - {}{}", item.id, item.display_title(), year);
        println!("    Kind: {}", item.kind());
    }

    if let Some(repo) = repo {
        match repo.updated_at(favorites.key()).await {
            Ok(Some(saved)) => println!("\nLast saved: {}", saved.format("%Y-%m-%d %H:%M")),
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read save time: {}", e),
        }
    }

    Ok(())
}
