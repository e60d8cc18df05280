use crate::drafts::DraftCache;
use crate::error::{describe_js, PopupError, PopupResult};
use crate::profile::ProfileKey;
use web_sys::Storage;

pub(crate) const DRAFT_KEY_PREFIX: &str = "linkedin_notes_draft::";

fn key(profile: &ProfileKey) -> String {
    format!("{DRAFT_KEY_PREFIX}{profile}")
}

fn local_storage() -> PopupResult<Storage> {
    let window =
        web_sys::window().ok_or_else(|| PopupError::browser("localStorage", "no window"))?;
    window
        .local_storage()
        .map_err(|e| PopupError::browser("localStorage", describe_js(&e)))?
        .ok_or_else(|| PopupError::browser("localStorage", "storage disabled"))
}

/// Drafts in `window.localStorage`.
///
/// Used when the popup page is loaded outside the extension, where `chrome.storage`
/// does not exist. Extension pages share one origin, so entries still survive a popup
/// being closed and reopened.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageDraftCache;

impl LocalStorageDraftCache {
    pub fn available() -> bool {
        local_storage().is_ok()
    }
}

impl DraftCache for LocalStorageDraftCache {
    async fn write(&self, profile: &ProfileKey, text: &str) -> PopupResult<()> {
        local_storage()?
            .set_item(&key(profile), text)
            .map_err(|e| PopupError::storage("write draft", describe_js(&e)))
    }

    async fn read(&self, profile: &ProfileKey) -> PopupResult<Option<String>> {
        local_storage()?
            .get_item(&key(profile))
            .map_err(|e| PopupError::storage("read draft", describe_js(&e)))
    }

    async fn remove(&self, profile: &ProfileKey) -> PopupResult<()> {
        local_storage()?
            .remove_item(&key(profile))
            .map_err(|e| PopupError::storage("remove draft", describe_js(&e)))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::profile::extract;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn test_local_storage_draft_roundtrip() {
        let cache = LocalStorageDraftCache;
        let k = extract("/in/wasm-test/").expect("profile path should match");

        cache.remove(&k).await.expect("clear");
        assert_eq!(cache.read(&k).await.expect("read"), None);

        cache.write(&k, "").await.expect("write empty");
        assert_eq!(cache.read(&k).await.expect("read"), Some(String::new()));

        cache.write(&k, "WIP note").await.expect("write");
        assert_eq!(cache.read(&k).await.expect("read").as_deref(), Some("WIP note"));

        cache.remove(&k).await.expect("remove");
        cache.remove(&k).await.expect("remove again");
        assert_eq!(cache.read(&k).await.expect("read"), None);
    }
}
