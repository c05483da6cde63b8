use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use tracing::debug;
use url::Url;

use crate::downloader::Downloader;
use crate::entity::{Chapter, EntityKind, Manga, Page};
use crate::error::{Error, Result};
use crate::html::{attribute, Query};
use crate::services::Service;

/// Scraping rules for one site, as plain data.
///
/// Selectors are CSS. `chapter_pattern` must capture the chapter number in
/// its first group; `chapter_digits` is the zero-padded width it is rendered at.
#[derive(Debug, Clone, Copy)]
pub struct SiteRules {
    pub name: &'static str,
    pub hosts: &'static [&'static str],
    /// Scheme and host that relative links are resolved against.
    pub base: &'static str,
    pub manga_marker: &'static str,
    pub chapter_marker: &'static str,
    pub manga_name: &'static str,
    pub manga_chapters: &'static str,
    pub chapter_name: &'static str,
    pub chapter_pages: &'static str,
    pub page_image: &'static str,
    pub chapter_pattern: &'static str,
    pub chapter_digits: usize,
}

/// Turns a chapter's display text into a fixed-width number so chapter
/// names sort the same way for every site.
///
/// Sites that number chapters differently supply their own pattern here.
#[derive(Debug, Clone)]
pub struct ChapterNumbering {
    pattern: Regex,
    width: usize,
}

impl ChapterNumbering {
    pub fn new(pattern: &str, width: usize) -> Result<Self> {
        Ok(Self { pattern: Regex::new(pattern)?, width })
    }

    pub fn canonicalize(&self, text: &str) -> Result<String> {
        let token = self
            .pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| Error::Format {
                text: text.to_string(),
                pattern: self.pattern.as_str().to_string(),
            })?
            .as_str();
        let number: u64 = token
            .parse()
            .map_err(|source| Error::Conversion { token: token.to_string(), source })?;
        Ok(format!("{:0width$}", number, width = self.width))
    }
}

/// Resolve a link taken from markup against a fixed base origin.
pub fn resolve(base: &Url, href: &str) -> Result<Url> {
    base.join(href).map_err(|e| Error::invalid_url(href, e))
}

/// A [`Service`] driven entirely by [`SiteRules`].
pub struct TemplateService {
    name: String,
    hosts: Vec<String>,
    base: Url,
    md: Arc<Downloader>,
    manga_marker: Query,
    chapter_marker: Query,
    manga_name: Query,
    manga_chapters: Query,
    chapter_name: Query,
    chapter_pages: Query,
    page_image: Query,
    numbering: ChapterNumbering,
}

impl TemplateService {
    /// Compiles every selector and the chapter pattern up front.
    pub fn new(rules: &SiteRules, md: Arc<Downloader>) -> Result<Self> {
        let numbering = ChapterNumbering::new(rules.chapter_pattern, rules.chapter_digits)?;
        Self::with_numbering(rules, md, numbering)
    }

    pub fn with_numbering(
        rules: &SiteRules,
        md: Arc<Downloader>,
        numbering: ChapterNumbering,
    ) -> Result<Self> {
        let base = Url::parse(rules.base).map_err(|e| Error::invalid_url(rules.base, e))?;
        Ok(Self {
            name: rules.name.to_string(),
            hosts: rules.hosts.iter().map(|h| h.to_ascii_lowercase()).collect(),
            base,
            md,
            manga_marker: Query::new(rules.manga_marker)?,
            chapter_marker: Query::new(rules.chapter_marker)?,
            manga_name: Query::new(rules.manga_name)?,
            manga_chapters: Query::new(rules.manga_chapters)?,
            chapter_name: Query::new(rules.chapter_name)?,
            chapter_pages: Query::new(rules.chapter_pages)?,
            page_image: Query::new(rules.page_image)?,
            numbering,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Locators from the `attr` attribute of every element matching `query`, in document order.
    async fn links(&self, url: &Url, query: &Query, attr: &str) -> Result<Vec<Url>> {
        let doc = self.md.get_html_doc(url).await?;
        let links = doc
            .select(query)
            .into_iter()
            .map(|el| attribute(el, query, attr).and_then(|href| resolve(&self.base, href)))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            service = %self.name,
            %url,
            selector = query.css(),
            count = links.len(),
            "collected links"
        );
        Ok(links)
    }
}

#[async_trait]
impl Service for TemplateService {
    fn name(&self) -> &str {
        &self.name
    }

    fn hosts(&self) -> &[String] {
        &self.hosts
    }

    async fn classify(&self, url: &Url) -> Result<EntityKind> {
        let doc = self.md.get_html_doc(url).await?;
        let manga = doc.count(&self.manga_marker);
        let chapter = doc.count(&self.chapter_marker);
        debug!(service = %self.name, %url, manga, chapter, "counted markers");
        match (manga, chapter) {
            (1, 0) => Ok(EntityKind::Manga),
            (0, 1) => Ok(EntityKind::Chapter),
            (0, 0) => Err(Error::UnknownKind { url: url.clone() }),
            (manga, chapter) => Err(Error::Ambiguous { url: url.clone(), manga, chapter }),
        }
    }

    async fn manga_name(&self, manga: &Manga) -> Result<String> {
        let doc = self.md.get_html_doc(manga.url()).await?;
        doc.single_text(&self.manga_name)
    }

    async fn manga_chapters(&self, manga: &Manga) -> Result<Vec<Chapter>> {
        let links = self.links(manga.url(), &self.manga_chapters, "href").await?;
        Ok(links.into_iter().map(|url| Chapter::new(url, manga.service().clone())).collect())
    }

    async fn chapter_name(&self, chapter: &Chapter) -> Result<String> {
        let doc = self.md.get_html_doc(chapter.url()).await?;
        let text = doc.single_text(&self.chapter_name)?;
        self.numbering.canonicalize(&text)
    }

    async fn chapter_pages(&self, chapter: &Chapter) -> Result<Vec<Page>> {
        let links = self.links(chapter.url(), &self.chapter_pages, "value").await?;
        Ok(links.into_iter().map(|url| Page::new(url, chapter.service().clone())).collect())
    }

    async fn page_image_url(&self, page: &Page) -> Result<Url> {
        let doc = self.md.get_html_doc(page.url()).await?;
        let img = doc.single(&self.page_image)?;
        let src = attribute(img, &self.page_image, "src")?;
        resolve(page.url(), src)
    }
}
