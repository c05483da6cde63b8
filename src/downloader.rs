use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::error::Result;
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::html::Document;

/// Process-wide context shared by every service: the only road to the network.
#[derive(Clone)]
pub struct Downloader {
    fetcher: Arc<dyn DocumentFetcher>,
}

impl Downloader {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { fetcher }
    }

    /// HTTP-backed context using the client settings from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(Arc::new(HttpFetcher::new(config)?)))
    }

    /// Fetch `url` and parse it. One request per call; nothing is cached.
    pub async fn get_html_doc(&self, url: &Url) -> Result<Document> {
        debug!(%url, "fetching document");
        let body = self.fetcher.fetch(url).await?;
        Ok(Document::parse(&body))
    }
}
