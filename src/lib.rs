//! Resolve manga, chapters, pages and page images from reader sites.
//!
//! Each supported site is a [`services::Service`]. A [`services::ServiceRegistry`]
//! routes an arbitrary locator to the service owning its host, the service
//! fetches the page once to decide whether it is a manga or a chapter, and
//! the returned [`entity::Entity`] resolves the rest of the tree on demand.
//! Nothing is cached: every accessor fetches its document again.

pub mod config;
pub mod downloader;
pub mod entity;
pub mod error;
pub mod fetch;
pub mod html;
pub mod services;

/// Convenience re-exports for embedders.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::downloader::Downloader;
    pub use crate::entity::{Chapter, Entity, EntityKind, Manga, Page};
    pub use crate::error::{Error, Result};
    pub use crate::fetch::{DocumentFetcher, FetchError, HttpFetcher, StaticFetcher};
    pub use crate::services::{Service, ServiceRegistry};
}

pub use error::{Error, Result};
