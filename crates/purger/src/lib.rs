// Purge targets (Cloudflare, future: Fastly, CloudFront)

pub mod cloudflare;
pub mod error;

pub use cloudflare::{CloudflarePurger, ResponseCheck};
pub use error::{Error, Result};

use async_trait::async_trait;

/// One URL evicted from one domain's cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgedFile {
    pub domain: String,
    pub url: String,
}

#[async_trait]
pub trait Purger: Send + Sync {
    /// Purge `path` on every configured domain, stopping at the first failure.
    async fn purge_file(&self, path: &str) -> Result<Vec<PurgedFile>>;

    /// Purge each path in turn, stopping at the first failure.
    async fn purge_files(&self, paths: &[String]) -> Result<Vec<PurgedFile>> {
        let mut purged = Vec::new();
        for path in paths {
            purged.extend(self.purge_file(path).await?);
        }
        Ok(purged)
    }
}
