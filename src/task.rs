//! Download task records emitted by the discovery stream.
//!
//! An [`ImageTask`] names one downloadable image plus the rule for naming it
//! on disk. The same work can surface once from the root listing (no
//! placement) and again from each album containing it (with placement);
//! consumers that want a single copy deduplicate on [`ImageTask::url`] or rely
//! on the content-derived filename, which makes re-downloads overwrite rather
//! than multiply.

use std::fmt;
use std::sync::Arc;

use crate::discovery::Album;

/// Filename rule signature: `(url, downloaded bytes) -> filename`.
pub type NameFn = dyn Fn(&str, &[u8]) -> String + Send + Sync;

/// How a task's file is named once its bytes are known.
#[derive(Clone)]
pub enum Naming {
    /// Use this filename as-is.
    Literal(String),
    /// Compute the filename from the URL and the downloaded content.
    Derived(Arc<NameFn>),
}

impl Naming {
    /// Wraps a naming function.
    pub fn derived<F>(f: F) -> Self
    where
        F: Fn(&str, &[u8]) -> String + Send + Sync + 'static,
    {
        Self::Derived(Arc::new(f))
    }

    /// Resolves the final filename for `url` with `content`.
    #[must_use]
    pub fn resolve(&self, url: &str, content: &[u8]) -> String {
        match self {
            Self::Literal(name) => name.clone(),
            Self::Derived(f) => f(url, content),
        }
    }
}

impl fmt::Debug for Naming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(name) => f.debug_tuple("Literal").field(name).finish(),
            Self::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// Album context a task was discovered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    album: Arc<Album>,
}

impl Placement {
    #[must_use]
    pub fn new(album: Arc<Album>) -> Self {
        Self { album }
    }

    #[must_use]
    pub fn album(&self) -> &Album {
        &self.album
    }

    #[must_use]
    pub fn album_name(&self) -> &str {
        &self.album.name
    }
}

/// One downloadable image.
#[derive(Debug, Clone)]
pub struct ImageTask {
    /// Image URL. Two tasks with the same URL refer to the same image.
    pub url: String,
    /// Filename rule applied at save time.
    pub naming: Naming,
    /// Album the task was found in; `None` for the root listing.
    pub placement: Option<Placement>,
}

impl ImageTask {
    #[must_use]
    pub fn new(url: impl Into<String>, naming: Naming) -> Self {
        Self {
            url: url.into(),
            naming,
            placement: None,
        }
    }

    /// Returns the task tagged with `placement`.
    #[must_use]
    pub fn with_placement(mut self, placement: Option<Placement>) -> Self {
        self.placement = placement;
        self
    }

    #[must_use]
    pub fn album_name(&self) -> Option<&str> {
        self.placement.as_ref().map(Placement::album_name)
    }
}
