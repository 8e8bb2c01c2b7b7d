use anyhow::Result;

use bingebox_core::AppConfig;

pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    let path = AppConfig::config_path();

    if init {
        if path.exists() {
            println!("Config already exists: {}", path.display());
        } else {
            AppConfig::default().save()?;
            println!("Wrote default config: {}", path.display());
        }
        return Ok(());
    }

    println!("Config file: {}", path.display());
    if !path.exists() {
        println!("  (not created yet, run 'bingebox config --init')");
    }
    println!("Database: {}", config.database_path().display());

    let key_state = if config.api_key().is_ok() { "set" } else { "missing" };
    println!("TMDB API key: {}", key_state);

    Ok(())
}
