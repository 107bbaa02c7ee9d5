//! Site entry point: one ArtStation profile.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::debug;

use crate::config::SiteConfig;
use crate::discovery::{DiscoveryError, Endpoints, MajorityVoteIdentity, TaskMaker};
use crate::transport::Transport;

static USERNAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = r"^[A-Za-z0-9_-]+$";
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
});

/// A validated profile on a configured ArtStation origin.
#[derive(Debug, Clone)]
pub struct ArtStation {
    profile_url: String,
    username: String,
    config: SiteConfig,
}

impl ArtStation {
    /// Parses `profile_url` (e.g. `https://www.artstation.com/someone`).
    ///
    /// Trailing slashes, a query string and a fragment are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`DiscoveryError::InvalidProfileUrl`] when the URL is not on the
    /// configured origin or does not name exactly one profile.
    pub fn new(profile_url: impl Into<String>, config: SiteConfig) -> Result<Self, DiscoveryError> {
        let profile_url = profile_url.into();
        let base = config.normalized_base_url();

        let Some(rest) = profile_url.strip_prefix(base) else {
            return Err(DiscoveryError::invalid_profile_url(
                &profile_url,
                "not on the configured site",
            ));
        };
        if !rest.starts_with('/') {
            return Err(DiscoveryError::invalid_profile_url(
                &profile_url,
                "not on the configured site",
            ));
        }

        let path = rest.split(['?', '#']).next().unwrap_or_default();
        let username = path.trim_matches('/');
        if username.is_empty() {
            return Err(DiscoveryError::invalid_profile_url(&profile_url, "missing username"));
        }
        if username.contains('/') {
            return Err(DiscoveryError::invalid_profile_url(
                &profile_url,
                "expected a single profile path segment",
            ));
        }
        if !USERNAME_RE.is_match(username) {
            return Err(DiscoveryError::invalid_profile_url(
                &profile_url,
                "username may only contain letters, digits, '_' and '-'",
            ));
        }

        let username = username.to_string();
        debug!(%username, "parsed profile url");
        Ok(Self {
            profile_url: format!("{base}/{username}"),
            username,
            config,
        })
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Canonical profile URL, `{base}/{username}`.
    #[must_use]
    pub fn profile_url(&self) -> &str {
        &self.profile_url
    }

    /// Subdirectory downloads for this profile go into.
    #[must_use]
    pub fn dir_name(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Task maker over `transport` with the majority-vote identity resolver.
    #[must_use]
    pub fn task_maker(&self, transport: Arc<dyn Transport>) -> TaskMaker {
        TaskMaker::new(
            transport,
            Arc::new(MajorityVoteIdentity),
            Endpoints::new(self.config.normalized_base_url()),
            self.username.clone(),
            self.profile_url.clone(),
            self.config.page_delay(),
        )
    }
}
