use std::num::ParseIntError;

use thiserror::Error;
use url::Url;

use crate::fetch::FetchError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that can go wrong while routing a locator or scraping a document.
///
/// Markup assumptions that no longer hold (missing or repeated elements, text
/// in an unexpected shape) get their own variants so callers can tell
/// template drift apart from transport failures.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no registered service supports {url}")]
    Unsupported { url: Url },

    #[error("could not identify {url}: no manga or chapter markup found")]
    UnknownKind { url: Url },

    #[error("could not identify {url}: {manga} manga marker(s) and {chapter} chapter marker(s)")]
    Ambiguous { url: Url, manga: usize, chapter: usize },

    #[error("expected exactly one element matching `{selector}`, found {count}")]
    ElementNotFound { selector: String, count: usize },

    #[error("element matching `{selector}` has no text content")]
    EmptyContent { selector: String },

    #[error("element matching `{selector}` has no `{attribute}` attribute")]
    MissingAttribute { selector: String, attribute: String },

    #[error("`{text}` does not match chapter pattern `{pattern}`")]
    Format { text: String, pattern: String },

    #[error("chapter number `{token}` is not a valid integer")]
    Conversion {
        token: String,
        #[source]
        source: ParseIntError,
    },

    #[error("invalid url `{value}`")]
    InvalidUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("host `{host}` is already served by {existing}")]
    DuplicateHost { host: String, existing: String },

    #[error("unknown service `{0}`")]
    UnknownService(String),

    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },

    #[error("invalid chapter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Transport failures are handed back exactly as the fetcher reported them.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl Error {
    pub(crate) fn invalid_url(value: &str, source: url::ParseError) -> Self {
        Self::InvalidUrl { value: value.to_string(), source }
    }
}
