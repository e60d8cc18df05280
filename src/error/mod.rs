#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupErrorKind {
    /// Native host port closed (or was never reachable).
    Disconnected,
    /// Draft cache read/write failed.
    Storage,
    /// Host sent something we could not decode, or we could not encode a request.
    Protocol,
    /// Host did not answer within the configured window.
    Timeout,
    /// A browser API was missing or rejected the call.
    Browser,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PopupError {
    pub kind: PopupErrorKind,
    pub message: String,
}

impl std::fmt::Display for PopupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PopupError {}

impl PopupError {
    pub fn disconnected(message: impl Into<String>) -> Self {
        Self {
            kind: PopupErrorKind::Disconnected,
            message: message.into(),
        }
    }

    pub fn storage(ctx: &str, e: impl std::fmt::Display) -> Self {
        Self {
            kind: PopupErrorKind::Storage,
            message: format!("{ctx}: {e}"),
        }
    }

    pub fn protocol(e: impl std::fmt::Display) -> Self {
        Self {
            kind: PopupErrorKind::Protocol,
            message: e.to_string(),
        }
    }

    pub fn timeout(ms: u32) -> Self {
        Self {
            kind: PopupErrorKind::Timeout,
            message: format!("Notes storage did not respond within {ms} ms."),
        }
    }

    pub fn browser(ctx: &str, detail: impl std::fmt::Display) -> Self {
        Self {
            kind: PopupErrorKind::Browser,
            message: format!("{ctx}: {detail}"),
        }
    }

    /// Disconnects and timeouts end the popup session; nothing else does on its own.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.kind,
            PopupErrorKind::Disconnected | PopupErrorKind::Timeout
        )
    }
}

/// Render a rejected JS promise / thrown value for an error message.
pub(crate) fn describe_js(value: &wasm_bindgen::JsValue) -> String {
    if let Some(s) = value.as_string() {
        return s;
    }
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{value:?}"))
}

pub type PopupResult<T> = Result<T, PopupError>;
