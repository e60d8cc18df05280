use wasm_bindgen::JsCast;

/// Run `f` once after `ms` milliseconds. Returns the timer handle, if one was set.
pub(crate) fn set_timeout(ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = wasm_bindgen::closure::Closure::once_into_js(f);
    let timeout = i32::try_from(ms).unwrap_or(i32::MAX);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        timeout,
    )
    .ok()
}
