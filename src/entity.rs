use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::error::Result;
use crate::services::Service;

/// A manga index page. Everything beyond the locator is fetched on demand.
#[derive(Debug, Clone)]
pub struct Manga {
    url: Url,
    service: Arc<dyn Service>,
}

impl Manga {
    pub fn new(url: Url, service: Arc<dyn Service>) -> Self {
        Self { url, service }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn service(&self) -> &Arc<dyn Service> { &self.service }

    /// Title text with surrounding whitespace trimmed.
    pub async fn name(&self) -> Result<String> {
        self.service.manga_name(self).await
    }

    /// Chapters in the order the site lists them.
    pub async fn chapters(&self) -> Result<Vec<Chapter>> {
        self.service.manga_chapters(self).await
    }
}

#[derive(Debug, Clone)]
pub struct Chapter {
    url: Url,
    service: Arc<dyn Service>,
}

impl Chapter {
    pub fn new(url: Url, service: Arc<dyn Service>) -> Self {
        Self { url, service }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn service(&self) -> &Arc<dyn Service> { &self.service }

    /// Canonical, zero-padded chapter number.
    pub async fn name(&self) -> Result<String> {
        self.service.chapter_name(self).await
    }

    pub async fn pages(&self) -> Result<Vec<Page>> {
        self.service.chapter_pages(self).await
    }

    /// Image locator of every page, in page order. Stops at the first failure.
    pub async fn image_urls(&self) -> Result<Vec<Url>> {
        let pages = self.pages().await?;
        let mut urls = Vec::with_capacity(pages.len());
        for page in &pages {
            urls.push(page.image_url().await?);
        }
        Ok(urls)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    url: Url,
    service: Arc<dyn Service>,
}

impl Page {
    pub fn new(url: Url, service: Arc<dyn Service>) -> Self {
        Self { url, service }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn service(&self) -> &Arc<dyn Service> { &self.service }

    pub async fn image_url(&self) -> Result<Url> {
        self.service.page_image_url(self).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Manga,
    Chapter,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Manga => f.write_str("manga"),
            EntityKind::Chapter => f.write_str("chapter"),
        }
    }
}

/// What an arbitrary locator turned out to be.
#[derive(Debug, Clone)]
pub enum Entity {
    Manga(Manga),
    Chapter(Chapter),
}

impl Entity {
    pub(crate) fn new(kind: EntityKind, url: Url, service: Arc<dyn Service>) -> Self {
        match kind {
            EntityKind::Manga => Entity::Manga(Manga::new(url, service)),
            EntityKind::Chapter => Entity::Chapter(Chapter::new(url, service)),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Manga(_) => EntityKind::Manga,
            Entity::Chapter(_) => EntityKind::Chapter,
        }
    }

    pub fn url(&self) -> &Url {
        match self {
            Entity::Manga(m) => m.url(),
            Entity::Chapter(c) => c.url(),
        }
    }

    pub fn service(&self) -> &Arc<dyn Service> {
        match self {
            Entity::Manga(m) => m.service(),
            Entity::Chapter(c) => c.service(),
        }
    }

    /// Display name: the manga title, or the canonical chapter number.
    pub async fn name(&self) -> Result<String> {
        match self {
            Entity::Manga(m) => m.name().await,
            Entity::Chapter(c) => c.name().await,
        }
    }
}
