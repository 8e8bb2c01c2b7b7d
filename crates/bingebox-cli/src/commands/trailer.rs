use anyhow::Result;
use tokio::sync::mpsc;

use bingebox_core::{
    media::{MediaItem, MediaKind},
    trailer::{TrailerCoordinator, TrailerFilter, TrailerLookup, TrailerStatus},
    AppConfig,
};

pub async fn run(config: &AppConfig, kind: MediaKind, id: i64, open_browser: bool) -> Result<()> {
    let api = super::tmdb_api(config)?;
    let lookup = TrailerLookup::new(api, TrailerFilter::from(&config.trailer));
    let mut coordinator = TrailerCoordinator::new(&config.trailer);

    let item = MediaItem::new(id, kind);
    let Some(request) = coordinator.select(&item) else {
        return Ok(());
    };

    println!("Looking up trailer for {} {}...", kind, id);

    let (tx, mut rx) = mpsc::unbounded_channel();
    TrailerCoordinator::spawn_lookup(lookup, request, tx);

    if let Some(response) = rx.recv().await {
        coordinator.apply(response);
    }

    match coordinator.status() {
        TrailerStatus::Ready { video_id, .. } => {
            println!("Trailer: {}", video_id);
            if let Some(url) = coordinator.watch_url() {
                println!("Watch: {}", url);
                if open_browser {
                    open::that(&url)?;
                }
            }
        }
        TrailerStatus::Failed { reason, .. } => {
            tracing::debug!("Lookup failed: {}", reason);
            println!("Trailer unavailable");
        }
        _ if coordinator.show_unavailable_notice() => println!("Trailer unavailable"),
        _ => println!("No response from trailer lookup."),
    }

    coordinator.teardown();
    Ok(())
}
