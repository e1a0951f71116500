//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up tft CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `db` - Optional database path to set as default
/// * `show` - If true, show current configuration
pub fn handle(db: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if let Some(path) = db {
        set_db_path(&mut config, path)?;
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    match config.get_db_path() {
        Some(path) => println!("Database: {}", path.display()),
        None => println!("Database: {} (default)", tft_db::DEFAULT_DB_PATH),
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Set the database path in configuration
fn set_db_path(config: &mut Config, path: PathBuf) -> Result<()> {
    println!("Database configured: {}", path.display());
    config.set_db_path(path);
    config.save()?;

    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: tft configure --db PATH");
    println!("   or: tft configure --show");
    println!();
    println!("The TFT_DB environment variable overrides the configured database.");
}
