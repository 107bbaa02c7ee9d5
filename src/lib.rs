//! ArtStation Core Library
//!
//! This library walks an ArtStation portfolio and turns every published image
//! into a download task. Root works come first, then every album's works,
//! each tagged with the album it was found in.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`transport`] - Direct HTTP and browser-relayed fetch strategies
//! - [`discovery`] - Pagination, identity resolution, and the task stream
//! - [`persist`] - Album-aware file layout and content-derived filenames
//! - [`task`] - The `ImageTask` record handed to download workers
//! - [`site`] - Profile URL validation and task stream wiring
//! - [`config`] - Site endpoints, throttle delay, timeouts, and proxy settings

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod discovery;
pub mod persist;
pub mod site;
pub mod task;
pub mod transport;
mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, ProxyConfig, SiteConfig};
pub use discovery::{
    Album, DiscoveryError, Endpoints, IdentityResolver, MajorityVoteIdentity, Paginator,
    TaskMaker, TaskStream, extract_images,
};
pub use persist::{PersistError, PersistenceSink, sanitize_component, sanitize_filename};
pub use site::ArtStation;
pub use task::{ImageTask, Naming, Placement};
pub use transport::{
    BrowserRelay, DirectTransport, Payload, RelaySession, RelayedTransport, Transport,
    TransportError,
};
