//! Portfolio discovery: from a profile URL to a stream of image tasks.
//!
//! # Architecture
//!
//! - [`TaskMaker`] - Drives the walk and yields [`crate::task::ImageTask`]s lazily
//! - [`Paginator`] - Counted page walk shared by all three listings
//! - [`IdentityResolver`] - Resolves the profile's numeric id
//!   ([`MajorityVoteIdentity`] scans the profile page)
//! - [`extract_images`] - Turns a work's detail record into image tasks
//! - [`Endpoints`] - URL templates for the JSON API
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use artstation_core::discovery::{Endpoints, MajorityVoteIdentity, TaskMaker};
//! use artstation_core::transport::DirectTransport;
//! use artstation_core::SiteConfig;
//! use futures_util::TryStreamExt;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = Arc::new(DirectTransport::new(&SiteConfig::default())?);
//! let maker = TaskMaker::new(
//!     transport,
//!     Arc::new(MajorityVoteIdentity),
//!     Endpoints::new("https://www.artstation.com"),
//!     "someone",
//!     "https://www.artstation.com/someone",
//!     Duration::from_millis(200),
//! );
//! let mut tasks = maker.tasks();
//! while let Some(task) = tasks.try_next().await? {
//!     println!("{} {:?}", task.url, task.album_name());
//! }
//! # Ok(())
//! # }
//! ```

mod endpoints;
mod error;
mod extractor;
mod identity;
mod models;
mod paginator;
mod task_maker;

pub use endpoints::{ALBUMS_PER_PAGE, Endpoints};
pub use error::DiscoveryError;
pub use extractor::extract_images;
pub use identity::{IdentityResolver, MajorityVoteIdentity, vote_user_id};
pub use models::{Album, Asset, AssetType, PageResponse, WorkDetail, WorkSummary};
pub use paginator::{Page, Paginator};
pub use task_maker::{TaskMaker, TaskStream};
