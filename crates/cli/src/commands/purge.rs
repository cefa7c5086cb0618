use anyhow::{Context, Result};
use purge_kit_purger::{CloudflarePurger, Purger, ResponseCheck};
use std::path::PathBuf;

use super::load_config;

/// Purge paths on every selected domain
pub async fn run(
    config: Option<PathBuf>,
    paths: Vec<String>,
    domains: Vec<String>,
    status_only: bool,
) -> Result<()> {
    let (_, config) = load_config(config)?;
    let config = config.select(&domains)?;

    let check = if status_only {
        ResponseCheck::StatusOnly
    } else {
        ResponseCheck::Full
    };
    let purger = CloudflarePurger::new(config.domains).response_check(check);

    println!(
        "🧹 Purging {} path(s) on {} domain(s)...",
        paths.len(),
        purger.domains().len()
    );
    if status_only {
        println!("   ⚠ Only checking HTTP status, response bodies are not verified");
    }
    println!();

    let purged = purger.purge_files(&paths).await.context("Purge failed")?;

    for file in &purged {
        println!("   ✓ {} ({})", file.url, file.domain);
    }
    println!();
    println!("✅ Purged {} URL(s)", purged.len());

    Ok(())
}
