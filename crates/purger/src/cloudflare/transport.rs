use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;

/// A fully built purge call for one zone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurgeRequest {
    pub endpoint: String,
    pub email: String,
    pub key: String,
    pub body: Vec<u8>,
}

/// Status and fully read body of a purge call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: PurgeRequest) -> Result<RawResponse, reqwest::Error>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: PurgeRequest) -> Result<RawResponse, reqwest::Error> {
        (**self).send(request).await
    }
}

/// Sends purge calls over HTTPS with reqwest
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: PurgeRequest) -> Result<RawResponse, reqwest::Error> {
        let response = self
            .client
            .delete(&request.endpoint)
            .header("X-Auth-Email", &request.email)
            .header("X-Auth-Key", &request.key)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
