use super::DraftCache;
use crate::error::{describe_js, PopupError, PopupResult};
use crate::profile::ProfileKey;
use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn storage_local_get(keys: &Array) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn storage_local_set(items: &Object) -> Result<Promise, JsValue>;

    #[wasm_bindgen(catch, js_namespace = ["chrome", "storage", "local"], js_name = remove)]
    fn storage_local_remove(keys: &Array) -> Result<Promise, JsValue>;
}

/// Drafts in `chrome.storage.local`, scoped to the extension.
#[derive(Clone, Debug, Default)]
pub struct ChromeDraftCache;

impl ChromeDraftCache {
    /// `chrome.storage.local` only exists when running as an extension page.
    pub fn available() -> bool {
        let global = js_sys::global();
        ["chrome", "storage", "local"]
            .into_iter()
            .try_fold(JsValue::from(global), |obj, name| {
                Reflect::get(&obj, &name.into())
                    .ok()
                    .filter(|v| v.is_object())
            })
            .is_some()
    }

    fn key_set(key: &ProfileKey) -> Array {
        Array::of1(&JsValue::from_str(key.as_str()))
    }
}

async fn settle(ctx: &str, call: Result<Promise, JsValue>) -> PopupResult<JsValue> {
    let promise = call.map_err(|e| PopupError::storage(ctx, describe_js(&e)))?;
    JsFuture::from(promise)
        .await
        .map_err(|e| PopupError::storage(ctx, describe_js(&e)))
}

impl DraftCache for ChromeDraftCache {
    async fn write(&self, key: &ProfileKey, text: &str) -> PopupResult<()> {
        log::debug!("writing draft for {key}");
        let items = Object::new();
        Reflect::set(&items, &key.as_str().into(), &text.into())
            .map_err(|e| PopupError::storage("write draft", describe_js(&e)))?;
        settle("write draft", storage_local_set(&items)).await?;
        Ok(())
    }

    async fn read(&self, key: &ProfileKey) -> PopupResult<Option<String>> {
        log::debug!("reading draft for {key}");
        let result = settle("read draft", storage_local_get(&Self::key_set(key))).await?;
        let k = JsValue::from_str(key.as_str());
        let present = Reflect::has(&result, &k)
            .map_err(|e| PopupError::storage("read draft", describe_js(&e)))?;
        if !present {
            return Ok(None);
        }
        let value = Reflect::get(&result, &k)
            .map_err(|e| PopupError::storage("read draft", describe_js(&e)))?;
        value
            .as_string()
            .map(Some)
            .ok_or_else(|| PopupError::storage("read draft", "stored draft is not a string"))
    }

    async fn remove(&self, key: &ProfileKey) -> PopupResult<()> {
        log::debug!("removing draft for {key}");
        settle("remove draft", storage_local_remove(&Self::key_set(key))).await?;
        Ok(())
    }
}
