//! Resolution of a profile's internal numeric id.
//!
//! The album index is keyed by the profile's numeric id, which only appears
//! embedded in the profile page. [`MajorityVoteIdentity`] scans the page for
//! every `user_id ... <digits>` occurrence and keeps the value seen most often,
//! so incidental numbers that happen to follow a `user_id` token lose the vote.

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use crate::transport::Transport;

use super::DiscoveryError;

static USER_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = r"user_id.*?(\d+)";
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
});

/// Source of the numeric profile id.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolves the numeric id for the profile at `profile_url`.
    async fn resolve(
        &self,
        transport: &dyn Transport,
        profile_url: &str,
    ) -> Result<u64, DiscoveryError>;
}

/// Text-scanning resolver with majority voting.
#[derive(Debug, Default, Clone, Copy)]
pub struct MajorityVoteIdentity;

#[async_trait]
impl IdentityResolver for MajorityVoteIdentity {
    #[tracing::instrument(skip(self, transport), fields(transport = transport.name()))]
    async fn resolve(
        &self,
        transport: &dyn Transport,
        profile_url: &str,
    ) -> Result<u64, DiscoveryError> {
        let page = transport.fetch_text(profile_url).await?;
        let user_id =
            vote_user_id(&page).ok_or_else(|| DiscoveryError::identity_not_found(profile_url))?;
        info!(user_id, "resolved profile identity");
        Ok(user_id)
    }
}

/// Returns the most frequent `user_id` value in `text`.
///
/// Ties go to the value that appeared first. Digit runs too long for `u64`
/// are skipped.
#[must_use]
pub fn vote_user_id(text: &str) -> Option<u64> {
    let mut tally: Vec<(u64, usize)> = Vec::new();
    for captures in USER_ID_RE.captures_iter(text) {
        let Some(value) = captures.get(1).and_then(|m| m.as_str().parse::<u64>().ok()) else {
            continue;
        };
        match tally.iter_mut().find(|(seen, _)| *seen == value) {
            Some((_, count)) => *count += 1,
            None => tally.push((value, 1)),
        }
    }
    debug!(candidates = tally.len(), "user_id vote");

    let mut winner: Option<(u64, usize)> = None;
    for &(value, count) in &tally {
        if winner.is_none_or(|(_, best)| count > best) {
            winner = Some((value, count));
        }
    }
    winner.map(|(value, _)| value)
}
