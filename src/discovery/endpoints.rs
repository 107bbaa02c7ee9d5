//! URL builders for the portfolio JSON API.

/// Albums are requested in pages of this size.
pub const ALBUMS_PER_PAGE: u32 = 25;

/// Endpoint templates rooted at one site origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    /// `base` is the site origin, e.g. `https://www.artstation.com`.
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Public profile page, `{base}/{username}`.
    #[must_use]
    pub fn profile(&self, username: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(username))
    }

    /// Root works listing page.
    #[must_use]
    pub fn projects_page(&self, username: &str, page: u32) -> String {
        format!(
            "{}/users/{}/projects.json?page={page}",
            self.base,
            urlencoding::encode(username)
        )
    }

    /// Album index page for a resolved profile id.
    #[must_use]
    pub fn albums_page(&self, user_id: u64, page: u32) -> String {
        format!(
            "{}/albums.json?include_total_count=true&page={page}&per_page={ALBUMS_PER_PAGE}&user_id={user_id}",
            self.base
        )
    }

    /// Works listing page scoped to one album.
    #[must_use]
    pub fn album_projects_page(&self, username: &str, album_id: u64, page: u32) -> String {
        format!(
            "{}/users/{}/projects.json?album_id={album_id}&page={page}",
            self.base,
            urlencoding::encode(username)
        )
    }

    /// Full work detail record.
    #[must_use]
    pub fn project_detail(&self, hash_id: &str) -> String {
        format!("{}/projects/{}.json", self.base, urlencoding::encode(hash_id))
    }
}
