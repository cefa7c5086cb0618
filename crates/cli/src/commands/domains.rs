use anyhow::Result;
use purge_kit_core::DomainConfig;
use std::path::PathBuf;

use super::load_config;

/// List configured domains. Credentials are never printed.
pub async fn run(config: Option<PathBuf>) -> Result<()> {
    let (path, config) = load_config(config)?;

    println!("📋 Domains in {}:", path.display());
    for (key, domain) in &config.domains {
        println!("{}", describe(key, domain));
    }

    Ok(())
}

fn describe(key: &str, domain: &DomainConfig) -> String {
    let mut line = format!("   {}", key);
    if domain.name != key {
        line.push_str(&format!(" ({})", domain.name));
    }
    line.push_str(&format!("\n     Zone: {}\n     URL:  {}", domain.zone_id, domain.url));
    line
}
