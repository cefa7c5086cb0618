// Cloudflare cache purge client

mod transport;

pub use transport::{HttpTransport, PurgeRequest, RawResponse, Transport};

use crate::error::{Error, Result};
use crate::{PurgedFile, Purger};
use async_trait::async_trait;
use purge_kit_core::{DomainConfig, Domains};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Cloudflare v4 API root
pub const API_BASE: &str = "https://api.cloudflare.com/client/v4";

/// How much of a 200 response to trust
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseCheck {
    /// Require a parseable body with `"success": true`
    #[default]
    Full,
    /// Accept any 200. A body reporting failure, or no JSON at all, still
    /// counts as purged.
    StatusOnly,
}

/// Body of a purge_cache call
#[derive(Debug, Serialize)]
struct PurgeFiles<'a> {
    files: Vec<&'a str>,
}

/// Cloudflare API response envelope
#[derive(Debug, Deserialize)]
pub struct PurgeResponse {
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub errors: Vec<serde_json::Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub messages: Vec<serde_json::Value>,
    #[serde(default)]
    pub result: serde_json::Value,
}

/// Cloudflare sends `null` rather than `[]` for empty lists on some endpoints
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<serde_json::Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default())
}

impl PurgeResponse {
    /// Error messages, whether Cloudflare sent `{code, message}` objects or bare strings
    pub fn error_messages(&self) -> Vec<String> {
        self.errors
            .iter()
            .map(|e| match e {
                serde_json::Value::String(s) => s.clone(),
                other => other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| other.to_string()),
            })
            .collect()
    }
}

/// Purges single files on every configured domain, one zone at a time
pub struct CloudflarePurger<T = HttpTransport> {
    domains: Domains,
    transport: T,
    api_base: String,
    check: ResponseCheck,
}

impl CloudflarePurger<HttpTransport> {
    pub fn new(domains: Domains) -> Self {
        Self::with_transport(domains, HttpTransport::new())
    }
}

impl<T: Transport> CloudflarePurger<T> {
    pub fn with_transport(domains: Domains, transport: T) -> Self {
        Self {
            domains,
            transport,
            api_base: API_BASE.to_string(),
            check: ResponseCheck::default(),
        }
    }

    /// Point at a different API root (e.g. a local stand-in)
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn response_check(mut self, check: ResponseCheck) -> Self {
        self.check = check;
        self
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    fn endpoint(&self, zone_id: &str) -> String {
        format!("{}/zones/{}/purge_cache", self.api_base, zone_id)
    }

    async fn purge_domain(
        &self,
        domain: &str,
        config: &DomainConfig,
        path: &str,
    ) -> Result<PurgedFile> {
        let url = join_url(&config.url, path);

        let body = serde_json::to_vec(&PurgeFiles { files: vec![&url] }).map_err(|source| {
            Error::Encoding {
                domain: domain.to_string(),
                source,
            }
        })?;

        debug!(domain, zone_id = %config.zone_id, %url, "sending purge request");
        let response = self
            .transport
            .send(PurgeRequest {
                endpoint: self.endpoint(&config.zone_id),
                email: config.email.clone(),
                key: config.key.clone(),
                body,
            })
            .await
            .map_err(|source| Error::Transport {
                domain: domain.to_string(),
                source,
            })?;

        check_response(domain, response, self.check)?;

        info!(domain, %url, "purged");
        Ok(PurgedFile {
            domain: domain.to_string(),
            url,
        })
    }
}

#[async_trait]
impl<T: Transport> Purger for CloudflarePurger<T> {
    async fn purge_file(&self, path: &str) -> Result<Vec<PurgedFile>> {
        let mut purged = Vec::with_capacity(self.domains.len());
        for (domain, config) in &self.domains {
            purged.push(self.purge_domain(domain, config, path).await?);
        }
        Ok(purged)
    }
}

fn check_response(domain: &str, response: RawResponse, check: ResponseCheck) -> Result<()> {
    if response.status != 200 {
        warn!(domain, status = response.status, "purge rejected");
        return Err(Error::RemoteStatus {
            domain: domain.to_string(),
            status: response.status,
            body: response.body,
        });
    }

    if check == ResponseCheck::StatusOnly {
        return Ok(());
    }

    match serde_json::from_str::<PurgeResponse>(&response.body) {
        Ok(parsed) if parsed.success => Ok(()),
        Ok(parsed) => {
            warn!(domain, errors = ?parsed.error_messages(), "purge reported failure");
            Err(Error::RemoteApplication {
                domain: domain.to_string(),
                body: response.body,
            })
        }
        Err(err) => {
            warn!(domain, error = %err, "unreadable purge response");
            Err(Error::RemoteApplication {
                domain: domain.to_string(),
                body: response.body,
            })
        }
    }
}

/// Join a base URL and a path with exactly one `/` between them.
///
/// Leading and trailing slashes are trimmed from both sides first, so
/// `https://example.com/` + `/images/logo.png` gives
/// `https://example.com/images/logo.png`.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_matches('/'), path.trim_matches('/'))
}
