pub mod mangareader;
pub mod template;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::config::Config;
use crate::downloader::Downloader;
use crate::entity::{Chapter, Entity, EntityKind, Manga, Page};
use crate::error::{Error, Result};

pub use template::{ChapterNumbering, SiteRules, TemplateService};

/// One site's rules for turning its markup into mangas, chapters and pages.
///
/// Every async method performs exactly one fetch of the entity's locator and
/// derives its answer from the live document.
#[async_trait]
pub trait Service: Send + Sync {
    /// Stable identifier for logs and registration.
    fn name(&self) -> &str;

    /// Host names this service answers for. Matched exactly.
    fn hosts(&self) -> &[String];

    /// Exact host match. A non-default port makes it a different origin.
    fn supports(&self, url: &Url) -> bool {
        url.port().is_none()
            && url.host_str().is_some_and(|host| self.hosts().iter().any(|h| h == host))
    }

    /// Decide from the fetched document whether `url` is a manga or a chapter.
    /// Callers check [`Service::supports`] first; see `identify` on `dyn Service`.
    async fn classify(&self, url: &Url) -> Result<EntityKind>;

    async fn manga_name(&self, manga: &Manga) -> Result<String>;
    async fn manga_chapters(&self, manga: &Manga) -> Result<Vec<Chapter>>;
    async fn chapter_name(&self, chapter: &Chapter) -> Result<String>;
    async fn chapter_pages(&self, chapter: &Chapter) -> Result<Vec<Page>>;
    async fn page_image_url(&self, page: &Page) -> Result<Url>;
}

impl dyn Service {
    /// Fetch `url` once and wrap it in the matching entity, owned by this service.
    pub async fn identify(self: Arc<Self>, url: Url) -> Result<Entity> {
        if !self.supports(&url) {
            return Err(Error::Unsupported { url });
        }
        let kind = self.classify(&url).await?;
        debug!(service = %self, %url, %kind, "identified");
        Ok(Entity::new(kind, url, self))
    }
}

impl fmt::Display for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Debug for dyn Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("name", &self.name())
            .field("hosts", &self.hosts())
            .finish()
    }
}

/// Ordered set of services, filled once at startup.
///
/// No two services may share a host, so routing a locator never depends on
/// registration order.
#[derive(Default)]
pub struct ServiceRegistry {
    services: Vec<Arc<dyn Service>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in service, in [`mangareader::BUILTIN`] order.
    pub fn with_defaults(md: Arc<Downloader>) -> Result<Self> {
        let mut registry = Self::new();
        for rules in mangareader::BUILTIN {
            registry.register(Arc::new(TemplateService::new(rules, md.clone())?))?;
        }
        Ok(registry)
    }

    /// The built-in services named in `names`, in that order.
    pub fn from_names<S: AsRef<str>>(md: Arc<Downloader>, names: &[S]) -> Result<Self> {
        let mut registry = Self::new();
        for name in names {
            let name = name.as_ref();
            let rules = mangareader::builtin(name)
                .ok_or_else(|| Error::UnknownService(name.to_string()))?;
            registry.register(Arc::new(TemplateService::new(rules, md.clone())?))?;
        }
        Ok(registry)
    }

    pub fn from_config(md: Arc<Downloader>, config: &Config) -> Result<Self> {
        match &config.services {
            Some(names) => Self::from_names(md, names),
            None => Self::with_defaults(md),
        }
    }

    pub fn register(&mut self, service: Arc<dyn Service>) -> Result<()> {
        for host in service.hosts() {
            if let Some(existing) = self.services.iter().find(|s| s.hosts().contains(host)) {
                return Err(Error::DuplicateHost {
                    host: host.clone(),
                    existing: existing.name().to_string(),
                });
            }
        }
        info!(service = %service, hosts = ?service.hosts(), "registered service");
        self.services.push(service);
        Ok(())
    }

    pub fn services(&self) -> &[Arc<dyn Service>] {
        &self.services
    }

    pub fn find(&self, url: &Url) -> Option<&Arc<dyn Service>> {
        self.services.iter().find(|s| s.supports(url))
    }

    /// Route `url` to its service by host, then let the service classify the page.
    pub async fn identify(&self, url: &Url) -> Result<Entity> {
        let service = self.find(url).ok_or_else(|| Error::Unsupported { url: url.clone() })?;
        Arc::clone(service).identify(url.clone()).await
    }

    pub async fn identify_str(&self, raw: &str) -> Result<Entity> {
        let url = Url::parse(raw).map_err(|e| Error::invalid_url(raw, e))?;
        self.identify(&url).await
    }
}
