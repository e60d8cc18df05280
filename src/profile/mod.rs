use serde::{Deserialize, Serialize};
use url::Url;

const PROFILE_PREFIX: &str = "/in/";

/// Per-profile key shared by the draft cache and the host.
///
/// Always the literal `/in/<id>/` prefix of the page path; nothing is normalized.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ProfileKey(String);

impl ProfileKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Match `^/in/[^/]+/` against a URL path and return the matched prefix.
pub fn extract(path: &str) -> Option<ProfileKey> {
    let rest = path.strip_prefix(PROFILE_PREFIX)?;
    let id_len = rest.find('/')?;
    if id_len == 0 {
        return None;
    }
    let end = PROFILE_PREFIX.len() + id_len + 1;
    Some(ProfileKey(path[..end].to_string()))
}

/// Why a tab does not get a notes session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NotApplicable {
    /// URL did not parse, or the tab had none (e.g. a browser-internal page).
    NoUrl,
    /// Different site, or a path outside `/in/`.
    NotProfilePage,
    /// Looked like a profile page but no key could be extracted.
    MalformedUrl,
}

/// Decide whether the active tab is a profile page and derive its key.
pub fn profile_for_tab(tab_url: &str, site_host: &str) -> Result<ProfileKey, NotApplicable> {
    let url = Url::parse(tab_url).map_err(|_| NotApplicable::NoUrl)?;
    if url.host_str() != Some(site_host) || !url.path().starts_with(PROFILE_PREFIX) {
        return Err(NotApplicable::NotProfilePage);
    }
    extract(url.path()).ok_or(NotApplicable::MalformedUrl)
}
