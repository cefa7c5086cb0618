use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Credentials and routing for one Cloudflare-fronted domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Informational; the map key is what identifies the domain
    pub name: String,
    /// Global API key, sent as `X-Auth-Key`
    pub key: String,
    /// Account email, sent as `X-Auth-Email`
    pub email: String,
    pub zone_id: String,
    /// Public base URL of the site, e.g. `https://example.com`
    pub url: String,
}

impl DomainConfig {
    pub fn new(
        name: impl Into<String>,
        key: impl Into<String>,
        email: impl Into<String>,
        zone_id: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            email: email.into(),
            zone_id: zone_id.into(),
            url: url.into(),
        }
    }
}

/// Domain name -> configuration. Sorted so purges run in a stable order.
pub type Domains = BTreeMap<String, DomainConfig>;
