//! The portfolio walk: identity, root works, then album works.
//!
//! [`TaskMaker::tasks`] returns a lazy stream. Nothing is fetched until the
//! consumer polls, and exactly one request is outstanding at a time. The walk
//! moves through fixed phases and never goes back:
//!
//! 1. resolve the profile's numeric id (once per stream)
//! 2. page through the root works listing; tasks carry no placement
//! 3. page through the album index, and for each album through its works
//!    listing; tasks carry that album as placement
//!
//! Every work summary costs one detail fetch. A work listed both at the root
//! and in albums is emitted once untagged and once per album;
//! the listings are independent. Consumers that want one copy per image
//! deduplicate on the task URL or rely on content-derived filenames.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, BoxStream, StreamExt};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info};

use crate::task::{ImageTask, Placement};
use crate::transport::{Payload, Transport};

use super::endpoints::Endpoints;
use super::extractor::extract_images;
use super::identity::IdentityResolver;
use super::models::{AlbumRecord, PageResponse, WorkDetail, WorkSummary};
use super::paginator::{Page, Paginator};
use super::{Album, DiscoveryError};

/// Lazy stream of image tasks; the first error ends it.
pub type TaskStream = BoxStream<'static, Result<ImageTask, DiscoveryError>>;

/// Builds task streams for one profile.
#[derive(Clone)]
pub struct TaskMaker {
    ctx: Arc<WalkContext>,
}

struct WalkContext {
    transport: Arc<dyn Transport>,
    identity: Arc<dyn IdentityResolver>,
    endpoints: Endpoints,
    username: String,
    profile_url: String,
    page_delay: Duration,
}

impl TaskMaker {
    /// Creates a task maker for `username`, whose public page is `profile_url`.
    pub fn new(
        transport: Arc<dyn Transport>,
        identity: Arc<dyn IdentityResolver>,
        endpoints: Endpoints,
        username: impl Into<String>,
        profile_url: impl Into<String>,
        page_delay: Duration,
    ) -> Self {
        Self {
            ctx: Arc::new(WalkContext {
                transport,
                identity,
                endpoints,
                username: username.into(),
                profile_url: profile_url.into(),
                page_delay,
            }),
        }
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.ctx.username
    }

    /// Starts a fresh walk. Each call re-resolves the identity and starts
    /// every listing from page 1.
    #[must_use]
    pub fn tasks(&self) -> TaskStream {
        let walk = Walk::new(Arc::clone(&self.ctx));
        stream::try_unfold(walk, |mut walk| async move {
            let next = walk.next_task().await?;
            Ok::<_, DiscoveryError>(next.map(|task| (task, walk)))
        })
        .boxed()
    }
}

impl std::fmt::Debug for TaskMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskMaker")
            .field("username", &self.ctx.username)
            .field("profile_url", &self.ctx.profile_url)
            .field("transport", &self.ctx.transport.name())
            .finish_non_exhaustive()
    }
}

/// Walk phase. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Uninitialized,
    IdentityResolved,
    EnumeratingRoot,
    EnumeratingAlbums,
    Done,
}

struct Walk {
    ctx: Arc<WalkContext>,
    phase: Phase,
    user_id: Option<u64>,
    ready: VecDeque<ImageTask>,
    works: VecDeque<WorkSummary>,
    placement: Option<Placement>,
    root_pages: Paginator,
    album_index: Paginator,
    albums: VecDeque<Arc<Album>>,
    album_pages: Option<(Arc<Album>, Paginator)>,
}

impl Walk {
    fn new(ctx: Arc<WalkContext>) -> Self {
        let delay = ctx.page_delay;
        Self {
            ctx,
            phase: Phase::Uninitialized,
            user_id: None,
            ready: VecDeque::new(),
            works: VecDeque::new(),
            placement: None,
            root_pages: Paginator::new("root works", delay),
            album_index: Paginator::new("album index", delay),
            albums: VecDeque::new(),
            album_pages: None,
        }
    }

    async fn next_task(&mut self) -> Result<Option<ImageTask>, DiscoveryError> {
        loop {
            if let Some(task) = self.ready.pop_front() {
                return Ok(Some(task));
            }
            if let Some(summary) = self.works.pop_front() {
                self.expand_work(&summary).await?;
                continue;
            }
            match self.phase {
                Phase::Uninitialized => {
                    let user_id = self
                        .ctx
                        .identity
                        .resolve(self.ctx.transport.as_ref(), &self.ctx.profile_url)
                        .await?;
                    self.user_id = Some(user_id);
                    self.phase = Phase::IdentityResolved;
                }
                Phase::IdentityResolved => {
                    debug!(username = %self.ctx.username, "enumerating root works");
                    self.phase = Phase::EnumeratingRoot;
                }
                Phase::EnumeratingRoot => self.advance_root().await?,
                Phase::EnumeratingAlbums => self.advance_albums().await?,
                Phase::Done => return Ok(None),
            }
        }
    }

    async fn advance_root(&mut self) -> Result<(), DiscoveryError> {
        let ctx = Arc::clone(&self.ctx);
        let batch = self
            .root_pages
            .next_page(|page| async move {
                let url = ctx.endpoints.projects_page(&ctx.username, page);
                ctx.fetch_page::<WorkSummary>(&url).await
            })
            .await?;
        match batch {
            Some(works) => self.works.extend(works),
            None => {
                info!(works = self.root_pages.accumulated(), "root listing done");
                self.phase = Phase::EnumeratingAlbums;
            }
        }
        Ok(())
    }

    async fn advance_albums(&mut self) -> Result<(), DiscoveryError> {
        if let Some((album, pages)) = &mut self.album_pages {
            let ctx = Arc::clone(&self.ctx);
            let album_id = album.id;
            let batch = pages
                .next_page(|page| async move {
                    let url = ctx.endpoints.album_projects_page(&ctx.username, album_id, page);
                    ctx.fetch_page::<WorkSummary>(&url).await
                })
                .await?;
            match batch {
                Some(works) => {
                    self.placement = Some(Placement::new(Arc::clone(album)));
                    self.works.extend(works);
                }
                None => {
                    debug!(album = %album.name, works = pages.accumulated(), "album done");
                    self.album_pages = None;
                }
            }
            return Ok(());
        }

        if let Some(album) = self.albums.pop_front() {
            info!(album = %album.name, album_id = album.id, "enumerating album");
            self.album_pages = Some((album, Paginator::new("album works", self.ctx.page_delay)));
            return Ok(());
        }

        let Some(user_id) = self.user_id else {
            self.phase = Phase::Done;
            return Ok(());
        };
        let ctx = Arc::clone(&self.ctx);
        let batch = self
            .album_index
            .next_page(|page| async move {
                let url = ctx.endpoints.albums_page(user_id, page);
                ctx.fetch_page::<AlbumRecord>(&url).await
            })
            .await?;
        match batch {
            Some(records) => self
                .albums
                .extend(records.into_iter().map(|record| Arc::new(Album::from(record)))),
            None => {
                info!(albums = self.album_index.accumulated(), "album listing done");
                self.phase = Phase::Done;
            }
        }
        Ok(())
    }

    async fn expand_work(&mut self, summary: &WorkSummary) -> Result<(), DiscoveryError> {
        let url = self.ctx.endpoints.project_detail(&summary.hash_id);
        let detail: WorkDetail = self.ctx.fetch_json(&url).await?;
        let placement = match self.phase {
            Phase::EnumeratingAlbums => self.placement.clone(),
            _ => None,
        };
        let before = self.ready.len();
        let tasks = extract_images(&detail).map(|task| task.with_placement(placement.clone()));
        self.ready.extend(tasks);
        debug!(
            work = %summary.hash_id,
            images = self.ready.len() - before,
            "expanded work"
        );
        Ok(())
    }
}

impl WalkContext {
    async fn fetch_value(&self, url: &str) -> Result<Value, DiscoveryError> {
        match self.transport.request(url).await? {
            Payload::Json(value) => Ok(value),
            Payload::Text(_) => Err(DiscoveryError::unexpected_text(url)),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, DiscoveryError> {
        let value = self.fetch_value(url).await?;
        serde_json::from_value(value).map_err(|error| DiscoveryError::decode(url, error))
    }

    async fn fetch_page<T: DeserializeOwned>(&self, url: &str) -> Result<Page<T>, DiscoveryError> {
        let value = self.fetch_value(url).await?;
        if value.get("total_count").is_none_or(Value::is_null) {
            return Err(DiscoveryError::missing_total_count(url));
        }
        let page: PageResponse<T> =
            serde_json::from_value(value).map_err(|error| DiscoveryError::decode(url, error))?;
        Ok(Page {
            total_count: page.total_count,
            items: page.data,
        })
    }
}
