use thiserror::Error;

/// Failure purging a single domain. Every variant names the domain that failed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to encode purge request for {domain}: {source}")]
    Encoding {
        domain: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Purge request for {domain} failed: {source}")]
    Transport {
        domain: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Cloudflare purge on {domain} failed with {status} - response: {body}")]
    RemoteStatus {
        domain: String,
        status: u16,
        body: String,
    },

    #[error("Cloudflare purge on {domain} failed. Dumping response: {body}")]
    RemoteApplication { domain: String, body: String },
}

impl Error {
    pub fn domain(&self) -> &str {
        match self {
            Error::Encoding { domain, .. }
            | Error::Transport { domain, .. }
            | Error::RemoteStatus { domain, .. }
            | Error::RemoteApplication { domain, .. } => domain,
        }
    }

    /// HTTP status, for non-200 responses
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, when a response was received
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::RemoteStatus { body, .. } | Error::RemoteApplication { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
