//! Page-by-page walk over a counted listing.
//!
//! Every listing endpoint answers `{total_count, data}`. The walk starts at
//! page 1 with a sentinel total of 1 so the first page is always fetched, then
//! keeps requesting pages until the number of items seen reaches the
//! server-reported total. The total is re-read from every page.
//!
//! A page that comes back empty while the total says more items remain ends
//! the walk; otherwise a stale total would loop forever.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use super::DiscoveryError;

/// One fetched page: server total plus this page's items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

/// Pagination state for one listing.
#[derive(Debug, Clone)]
pub struct Paginator {
    label: &'static str,
    page: u32,
    accumulated: u64,
    total: u64,
    stalled: bool,
    delay: Duration,
}

impl Paginator {
    /// Fresh walk starting at page 1. `delay` is slept after every fetch.
    #[must_use]
    pub fn new(label: &'static str, delay: Duration) -> Self {
        Self {
            label,
            page: 1,
            accumulated: 0,
            total: 1,
            stalled: false,
            delay,
        }
    }

    /// True while another page should be requested.
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.stalled && self.accumulated < self.total
    }

    /// Page number the next fetch will request.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items seen so far.
    #[must_use]
    pub fn accumulated(&self) -> u64 {
        self.accumulated
    }

    /// Fetches the next page with `fetch(page)`.
    ///
    /// Returns `Ok(None)` once the listing is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates the fetch error; the walk is not advanced.
    pub async fn next_page<T, F, Fut>(
        &mut self,
        fetch: F,
    ) -> Result<Option<Vec<T>>, DiscoveryError>
    where
        F: FnOnce(u32) -> Fut,
        Fut: Future<Output = Result<Page<T>, DiscoveryError>>,
    {
        if !self.has_next() {
            return Ok(None);
        }

        let page = self.page;
        let Page { total_count, items } = fetch(page).await?;
        self.total = total_count;
        self.accumulated += items.len() as u64;
        self.page += 1;
        debug!(
            listing = self.label,
            page,
            items = items.len(),
            accumulated = self.accumulated,
            total = self.total,
            "fetched page"
        );

        if items.is_empty() && self.accumulated < self.total {
            warn!(
                listing = self.label,
                page,
                accumulated = self.accumulated,
                total = self.total,
                "empty page before reaching reported total; stopping this listing"
            );
            self.stalled = true;
        }

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(Some(items))
    }
}
