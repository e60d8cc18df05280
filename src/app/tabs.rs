use crate::error::{describe_js, PopupError, PopupResult};
use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["chrome", "tabs"], js_name = query)]
    fn tabs_query(query_info: &Object) -> Result<Promise, JsValue>;
}

/// URL of the active tab in the current window.
///
/// `Ok(None)` when there is no such tab or the extension may not see its URL.
pub(crate) async fn active_tab_url() -> PopupResult<Option<String>> {
    let query = Object::new();
    for field in ["active", "currentWindow"] {
        Reflect::set(&query, &field.into(), &JsValue::TRUE)
            .map_err(|e| PopupError::browser("tabs.query", describe_js(&e)))?;
    }

    let promise =
        tabs_query(&query).map_err(|e| PopupError::browser("tabs.query", describe_js(&e)))?;
    let tabs = JsFuture::from(promise)
        .await
        .map_err(|e| PopupError::browser("tabs.query", describe_js(&e)))?;

    let tabs: Array = tabs.unchecked_into();
    let tab = tabs.get(0);
    if tab.is_undefined() {
        return Ok(None);
    }
    Ok(Reflect::get(&tab, &"url".into())
        .ok()
        .and_then(|u| u.as_string()))
}
