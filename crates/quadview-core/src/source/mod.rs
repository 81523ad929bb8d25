//! Read-only data sources for image sets.

pub mod directory;
pub mod http;

use std::sync::Arc;

use crate::config::SourceConfig;
use crate::error::Result;
use crate::pane::{PaneKey, PaneMap};

pub use directory::DirectorySource;
pub use http::HttpSource;

/// The three operations the viewer needs from wherever the images live.
///
/// Implementations are shared between worker threads, so they must be
/// `Send + Sync` and hold no per-load state.
pub trait ImageSource: Send + Sync {
    /// Ordered set identifiers. May be empty.
    fn list_sets(&self) -> Result<Vec<String>>;

    /// Locator of each pane's full-resolution asset for `set`.
    fn full_resolution_urls(&self, set: &str) -> Result<PaneMap<String>>;

    /// Encoded bytes of the low-resolution preview for one pane.
    fn fetch_preview(&self, set: &str, pane: PaneKey) -> Result<Vec<u8>>;

    /// Encoded bytes of a full-resolution asset returned by
    /// [`ImageSource::full_resolution_urls`].
    fn fetch_full(&self, url: &str) -> Result<Vec<u8>>;

    /// Short human-readable description for logs and the status bar.
    fn describe(&self) -> String;
}

/// Build the source described by `config`.
pub fn open_source(config: &SourceConfig) -> Result<Arc<dyn ImageSource>> {
    match config {
        SourceConfig::Http { base_url } => Ok(Arc::new(HttpSource::new(base_url.clone()))),
        SourceConfig::Directory(dir) => Ok(Arc::new(DirectorySource::new(dir.clone())?)),
    }
}
