use crate::error::{Error, Result};
use crate::types::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Raw TOML configuration structure
/// This matches the config.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    domains: BTreeMap<String, RawDomain>,
}

#[derive(Debug, Deserialize)]
struct RawDomain {
    name: Option<String>, // Defaults to the table key
    key: String,
    email: String,
    zone_id: String,
    url: String,
}

/// Parsed purge configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub domains: Domains,
}

impl Config {
    /// Keep only the named domains. An empty selection keeps everything.
    pub fn select(self, names: &[String]) -> Result<Config> {
        if names.is_empty() {
            return Ok(self);
        }

        let mut domains = self.domains;
        let mut selected = Domains::new();
        for name in names {
            if selected.contains_key(name) {
                continue;
            }
            let domain = domains.remove(name).ok_or_else(|| {
                Error::InvalidData(format!("Unknown domain '{}' (not in config)", name))
            })?;
            selected.insert(name.clone(), domain);
        }

        Ok(Config { domains: selected })
    }
}

/// Parse config.toml from a file path
pub fn parse_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config_str(&content)
}

/// Parse config.toml from a string (useful for testing)
pub fn parse_config_str(content: &str) -> Result<Config> {
    let raw: RawConfig = toml::from_str(content)?;

    if raw.domains.is_empty() {
        return Err(Error::ConfigParse(
            "No domains configured. Add at least one [domains.<name>] table".to_string(),
        ));
    }

    let domains = raw
        .domains
        .into_iter()
        .map(|(key, d)| {
            validate_field(&d.key, &key, "key")?;
            validate_field(&d.email, &key, "email")?;
            validate_field(&d.zone_id, &key, "zone_id")?;
            validate_field(&d.url, &key, "url")?;

            let domain = DomainConfig {
                name: d.name.unwrap_or_else(|| key.clone()),
                key: d.key,
                email: d.email,
                zone_id: d.zone_id,
                url: d.url,
            };
            Ok((key, domain))
        })
        .collect::<Result<Domains>>()?;

    Ok(Config { domains })
}

/// Reject blank credential and routing fields
fn validate_field(value: &str, domain: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty '{}' for domain '{}'",
            field, domain
        )));
    }
    Ok(())
}
