use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

pub const DEFAULT_HOST_NAME: &str = "com.jayqi.linkedin_notes_storage";
pub const DEFAULT_SITE_HOST: &str = "www.linkedin.com";
pub const DEFAULT_PLACEHOLDER: &str = "Enter a note here.";
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u32 = 10_000;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct PopupConfig {
    /// Native messaging host the popup connects to.
    pub host_name: String,
    /// Host name profile pages are served from.
    pub site_host: String,
    pub placeholder: String,
    /// 0 disables the response timeout.
    pub response_timeout_ms: u32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            host_name: DEFAULT_HOST_NAME.to_string(),
            site_host: DEFAULT_SITE_HOST.to_string(),
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            response_timeout_ms: DEFAULT_RESPONSE_TIMEOUT_MS,
        }
    }
}

impl PopupConfig {
    /// Read overrides from `window.ENV`, falling back to defaults per field.
    ///
    /// Both `HOST_NAME` and `host_name` spellings are accepted.
    pub fn from_window() -> Self {
        let mut config = Self::default();

        let Some(env) = web_sys::window().and_then(|w| w.get("ENV")) else {
            return config;
        };
        if env.is_undefined() || !env.is_object() {
            return config;
        }
        let env: JsValue = env.into();

        if let Some(v) = read_string(&env, "HOST_NAME", "host_name") {
            config.host_name = v;
        }
        if let Some(v) = read_string(&env, "SITE_HOST", "site_host") {
            config.site_host = v;
        }
        if let Some(v) = read_string(&env, "PLACEHOLDER", "placeholder") {
            config.placeholder = v;
        }
        if let Some(v) = read_number(&env, "RESPONSE_TIMEOUT_MS", "response_timeout_ms") {
            config.response_timeout_ms = v;
        }

        log::debug!("popup config: {config:?}");
        config
    }

    pub fn timeout_enabled(&self) -> bool {
        self.response_timeout_ms > 0
    }
}

fn read_field(env: &JsValue, upper: &str, lower: &str) -> Option<JsValue> {
    [upper, lower].into_iter().find_map(|k| {
        js_sys::Reflect::get(env, &k.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
    })
}

fn read_string(env: &JsValue, upper: &str, lower: &str) -> Option<String> {
    read_field(env, upper, lower)
        .and_then(|v| v.as_string())
        .filter(|s| !s.trim().is_empty())
}

fn read_number(env: &JsValue, upper: &str, lower: &str) -> Option<u32> {
    let v = read_field(env, upper, lower)?;
    let n = v.as_f64()?;
    if n.is_finite() && n >= 0.0 {
        Some(n.min(u32::MAX as f64) as u32)
    } else {
        None
    }
}
