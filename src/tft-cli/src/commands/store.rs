//! Store command handler
//!
//! Refines the items section of a metadata file and upserts it into SQLite.

use crate::config::Config;
use crate::file_io;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tft_db::{BulkRepository, BulkResult, ItemsRepository, SqliteDb};

/// Refine and store the items of `json` into an opened database
fn store_items(db: &SqliteDb, json: &str) -> Result<BulkResult> {
    let refined = tft_meta::refine_metadata_str(json).context("Failed to refine metadata")?;

    db.init().context("Failed to initialize database")?;
    let result = db
        .upsert_items(&refined.items)
        .context("Failed to store items")?;

    for (label, error) in &result.errors {
        tracing::debug!("Item {} skipped: {}", label, error);
    }
    Ok(result)
}

/// Handle the store command
pub fn handle(input: &Path, db: Option<PathBuf>) -> Result<()> {
    let db_path = Config::load()?.resolve_db_path(db);

    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let json = file_io::read_input(input)?;
    let database = SqliteDb::open(&db_path)
        .with_context(|| format!("Failed to open database {}", db_path.display()))?;
    let result = store_items(&database, &json)?;

    println!(
        "Stored {} items in {} ({} skipped)",
        result.succeeded,
        db_path.display(),
        result.failed
    );
    Ok(())
}
