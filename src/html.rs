use scraper::{ElementRef, Html, Selector};

use crate::error::{Error, Result};

/// A compiled CSS selector that remembers its source text for error reports.
#[derive(Debug, Clone)]
pub struct Query {
    css: String,
    selector: Selector,
}

impl Query {
    pub fn new(css: &str) -> Result<Self> {
        let selector = Selector::parse(css).map_err(|e| Error::Selector {
            selector: css.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { css: css.to_string(), selector })
    }

    pub fn css(&self) -> &str {
        &self.css
    }
}

/// A parsed HTML document.
///
/// Not `Send`: parse it after the last `.await` of whatever produced the body
/// and drop it before awaiting again.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Self { html: Html::parse_document(body) }
    }

    /// All matches, in document order.
    pub fn select<'a>(&'a self, query: &Query) -> Vec<ElementRef<'a>> {
        self.html.select(&query.selector).collect()
    }

    pub fn count(&self, query: &Query) -> usize {
        self.html.select(&query.selector).count()
    }

    /// The one element matching `query`. Zero or several matches are an error,
    /// never a silent pick of the first.
    pub fn single<'a>(&'a self, query: &Query) -> Result<ElementRef<'a>> {
        let mut matches = self.select(query);
        if matches.len() != 1 {
            return Err(Error::ElementNotFound {
                selector: query.css().to_string(),
                count: matches.len(),
            });
        }
        Ok(matches.remove(0))
    }

    /// Text of the first child of the single element matching `query`, trimmed.
    pub fn single_text(&self, query: &Query) -> Result<String> {
        let element = self.single(query)?;
        first_child_text(element)
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
            .ok_or_else(|| Error::EmptyContent { selector: query.css().to_string() })
    }
}

/// The first child node of `element`, if it is a text node.
pub fn first_child_text(element: ElementRef<'_>) -> Option<&str> {
    element.first_child()?.value().as_text().map(|text| &**text)
}

pub fn attribute<'a>(element: ElementRef<'a>, query: &Query, name: &str) -> Result<&'a str> {
    element.value().attr(name).ok_or_else(|| Error::MissingAttribute {
        selector: query.css().to_string(),
        attribute: name.to_string(),
    })
}
