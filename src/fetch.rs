use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with HTTP {status}")]
    Status { url: Url, status: u16 },

    #[error("no document available for {url}")]
    Missing { url: Url },
}

/// Retrieves the raw HTML body behind a locator.
///
/// Timeouts and transport policy live here; nothing above this layer retries.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Fetches documents over HTTP with a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        debug!(%url, status = status.as_u16(), "fetched");
        if !status.is_success() {
            return Err(FetchError::Status { url: url.clone(), status: status.as_u16() });
        }
        Ok(resp.text().await?)
    }
}

/// Serves canned documents from memory and records every request.
///
/// Handy for replaying saved pages offline.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    documents: HashMap<Url, String>,
    requests: Mutex<Vec<Url>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: Url, body: impl Into<String>) {
        self.documents.insert(url, body.into());
    }

    pub fn with(mut self, url: Url, body: impl Into<String>) -> Self {
        self.insert(url, body);
        self
    }

    /// Every locator requested so far, in request order.
    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl DocumentFetcher for StaticFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(url.clone());
        self.documents.get(url).cloned().ok_or_else(|| FetchError::Missing { url: url.clone() })
    }
}
