pub mod domains;
pub mod purge;

use anyhow::{Context, Result};
use purge_kit_core::{Config, parse_config};
use std::path::PathBuf;
use tracing::debug;

/// Resolve the config file: explicit path, else ~/.purge-kit/config.toml
fn config_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .context("Could not determine home directory")?;
    Ok(PathBuf::from(home).join(".purge-kit").join("config.toml"))
}

/// Load domain config
fn load_config(explicit: Option<PathBuf>) -> Result<(PathBuf, Config)> {
    let path = config_path(explicit)?;
    if !path.exists() {
        anyhow::bail!(
            "No configuration found at {}\nAdd one [domains.<name>] table per domain (key, email, zone_id, url)",
            path.display()
        );
    }
    let config = parse_config(&path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    debug!(path = %path.display(), domains = config.domains.len(), "loaded config");
    Ok((path, config))
}
