//! Refine command handler
//!
//! Reads a CommunityDragon metadata document and writes the refined JSON.

use crate::cli::Section;
use crate::file_io;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tft_meta::RefinedMetadata;

fn to_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> serde_json::Result<Vec<u8>> {
    if compact {
        serde_json::to_vec(value)
    } else {
        serde_json::to_vec_pretty(value)
    }
}

/// Serialize the requested section of a refined document
fn render(refined: &RefinedMetadata, section: Section, compact: bool) -> Result<Vec<u8>> {
    let json = match section {
        Section::All => to_json(refined, compact),
        Section::Items => to_json(&refined.items, compact),
        Section::SetData => to_json(&refined.set_data, compact),
        Section::Sets => to_json(&refined.sets, compact),
    };
    json.context("Failed to serialize refined metadata")
}

/// Handle the refine command
pub fn handle(input: &Path, output: Option<&Path>, section: Section, compact: bool) -> Result<()> {
    let json = file_io::read_input(input)?;
    let refined = tft_meta::refine_metadata_str(&json)
        .with_context(|| format!("Failed to refine {}", input.display()))?;

    for failure in &refined.report.failures {
        tracing::debug!(
            "{} #{} not refined: {}",
            failure.kind,
            failure.index,
            failure.error
        );
    }
    if !refined.report.is_clean() {
        tracing::warn!(
            "{} entities could not be refined",
            refined.report.failures.len()
        );
    }

    let data = render(&refined, section, compact)?;
    file_io::write_output(output, &data)?;

    if let Some(path) = output {
        tracing::info!("Wrote refined metadata to {}", path.display());
    }
    Ok(())
}
