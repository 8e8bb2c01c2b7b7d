use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bingebox_core::{media::MediaKind, AppConfig};

mod commands;

#[derive(Parser)]
#[command(name = "bingebox")]
#[command(author, version, about = "Browse movies and shows, watch trailers, keep a list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the trailer for a title
    Trailer {
        /// movie or tv
        #[arg(short = 'k', long, default_value = "movie")]
        kind: MediaKind,
        /// TMDB id
        #[arg(short = 'i', long)]
        id: i64,
        /// Open the trailer in the browser
        #[arg(long)]
        open: bool,
    },
    /// Show My List
    List,
    /// Add a title to My List, or remove it if already there
    Toggle {
        /// movie or tv
        #[arg(short = 'k', long, default_value = "movie")]
        kind: MediaKind,
        /// TMDB id
        #[arg(short = 'i', long)]
        id: i64,
        /// Title to store instead of fetching details
        #[arg(short = 't', long)]
        title: Option<String>,
    },
    /// Show one browse row
    Row {
        /// Row slug, see `bingebox rows`
        slug: String,
    },
    /// List browse rows
    Rows,
    /// Show the config file location
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Arc::new(AppConfig::load()?);

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Trailer { kind, id, open } => commands::trailer::run(&config, kind, id, open).await,
        Commands::List => commands::list::run(&config).await,
        Commands::Toggle { kind, id, title } => {
            commands::toggle::run(&config, kind, id, title).await
        }
        Commands::Row { slug } => commands::row::run(&config, &slug).await,
        Commands::Rows => {
            commands::row::list_rows();
            Ok(())
        }
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
