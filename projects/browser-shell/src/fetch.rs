// fetch.rs - Fetch collaborator: address in, page or typed failure out

use crate::errors::{FetchError, ShellError};
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// A fetched page. Only 2xx responses become pages; everything else is a
/// `FetchError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub address: String,
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, address: &str) -> Result<Page, FetchError>;
}

/// Parse and validate an address the way every fetcher should
pub fn parse_address(address: &str) -> Result<Url, FetchError> {
    let url = Url::parse(address.trim()).map_err(|e| FetchError::MalformedAddress(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(FetchError::UnsupportedScheme(other.to_string())),
    }
}

/// HTTP(S) fetcher backed by reqwest
pub struct HttpFetcher {
    http_client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> crate::errors::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ShellError::Generic(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { http_client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, address: &str) -> Result<Page, FetchError> {
        let url = parse_address(address)?;

        let response = self
            .http_client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| {
                if e.is_builder() {
                    FetchError::MalformedAddress(e.to_string())
                } else {
                    FetchError::UnreachableHost(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::warn!("Failed to read body from {}: {}", url, e);
            FetchError::EmptyResponse
        })?;

        if !status.is_success() {
            log::info!("{} returned status {}", url, status);
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        log::debug!("Fetched {} ({} bytes)", url, body.len());
        Ok(Page {
            address: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}
