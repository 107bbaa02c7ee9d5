//! Fixed User-Agent string for every request the crate issues.

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/nicksrandall/artstation-dl";

/// Default User-Agent for API and profile requests.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("artstation-dl/{version} (portfolio-archiver; +{PROJECT_UA_URL})")
}
