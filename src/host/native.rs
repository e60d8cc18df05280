use super::{HostChannel, HostConnector};
use crate::error::{describe_js, PopupError, PopupResult};
use crate::protocol::{HostRequest, HostResponse};
use crate::state::{forward, PopupEvent};
use futures::channel::mpsc::UnboundedSender;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `chrome.runtime.Port`
    type Port;

    #[wasm_bindgen(method, catch, js_name = postMessage)]
    fn post_message(this: &Port, message: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn disconnect(this: &Port);

    #[wasm_bindgen(method, getter, js_name = onMessage)]
    fn on_message(this: &Port) -> PortEvent;

    #[wasm_bindgen(method, getter, js_name = onDisconnect)]
    fn on_disconnect(this: &Port) -> PortEvent;

    type PortEvent;

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &PortEvent, listener: &js_sys::Function);

    #[wasm_bindgen(catch, js_namespace = ["chrome", "runtime"], js_name = connectNative)]
    fn connect_native(application: &str) -> Result<Port, JsValue>;
}

/// `chrome.runtime.lastError.message`, set while a disconnect listener runs.
fn last_error_message() -> Option<String> {
    let runtime = ["chrome", "runtime"]
        .into_iter()
        .try_fold(JsValue::from(js_sys::global()), |obj, name| {
            js_sys::Reflect::get(&obj, &name.into())
                .ok()
                .filter(|v| v.is_object())
        })?;
    let last_error = js_sys::Reflect::get(&runtime, &"lastError".into()).ok()?;
    if last_error.is_undefined() || last_error.is_null() {
        return None;
    }
    js_sys::Reflect::get(&last_error, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
}

fn decode_message(message: &JsValue) -> PopupResult<HostResponse> {
    let json = js_sys::JSON::stringify(message)
        .map_err(|e| PopupError::protocol(describe_js(&e)))?;
    let json: String = json.into();
    HostResponse::from_json(&json)
}

/// Opens `chrome.runtime.connectNative` ports wired to a session's event stream.
#[derive(Clone)]
pub struct NativeConnector {
    events: UnboundedSender<PopupEvent>,
}

impl NativeConnector {
    pub fn new(events: UnboundedSender<PopupEvent>) -> Self {
        Self { events }
    }
}

impl HostConnector for NativeConnector {
    type Channel = NativePort;

    fn connect(&self, host_name: &str) -> PopupResult<NativePort> {
        log::info!("connecting to native host {host_name}");
        let port = connect_native(host_name)
            .map_err(|e| PopupError::disconnected(describe_js(&e)))?;
        let connected = Rc::new(Cell::new(true));

        let tx = self.events.clone();
        let on_message = Closure::<dyn FnMut(JsValue)>::new(move |message: JsValue| {
            match decode_message(&message) {
                Ok(response) => forward(&tx, PopupEvent::Host(response)),
                Err(e) => log::error!("undecodable host message: {e}"),
            }
        });
        port.on_message()
            .add_listener(on_message.as_ref().unchecked_ref());

        let tx = self.events.clone();
        let alive = connected.clone();
        let on_disconnect = Closure::<dyn FnMut()>::new(move || {
            alive.set(false);
            let reason = last_error_message();
            log::error!("native host disconnected: {reason:?}");
            forward(&tx, PopupEvent::Disconnected { reason });
        });
        port.on_disconnect()
            .add_listener(on_disconnect.as_ref().unchecked_ref());

        Ok(NativePort {
            port,
            connected,
            _on_message: on_message,
            _on_disconnect: on_disconnect,
        })
    }
}

pub struct NativePort {
    port: Port,
    connected: Rc<Cell<bool>>,

    /// Listener closures must outlive the port.
    _on_message: Closure<dyn FnMut(JsValue)>,
    _on_disconnect: Closure<dyn FnMut()>,
}

impl HostChannel for NativePort {
    fn post(&mut self, request: &HostRequest) -> PopupResult<()> {
        if !self.connected.get() {
            return Err(PopupError::disconnected(
                "Connection to notes storage is closed.",
            ));
        }
        let json = request.to_json()?;
        let message =
            js_sys::JSON::parse(&json).map_err(|e| PopupError::protocol(describe_js(&e)))?;
        log::debug!("posting host request {json}");
        self.port.post_message(&message).map_err(|e| {
            self.connected.set(false);
            PopupError::disconnected(describe_js(&e))
        })
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }
}

impl Drop for NativePort {
    fn drop(&mut self) {
        if self.connected.replace(false) {
            self.port.disconnect();
        }
    }
}
