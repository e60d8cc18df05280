//! Popup for attaching a private note to a LinkedIn profile.
//!
//! Notes live in a native-messaging host; unsaved edits are kept in extension storage
//! so closing the popup never loses them.

mod app;
mod components;
pub mod config;
pub mod drafts;
pub mod error;
pub mod host;
pub mod profile;
pub mod protocol;
pub mod state;
pub mod storage;
pub mod ui;
mod util;

pub use app::Popup;
pub use config::PopupConfig;
pub use drafts::{DraftCache, MemoryDraftCache};
pub use error::{PopupError, PopupErrorKind, PopupResult};
pub use host::{HostChannel, HostConnector};
pub use profile::{extract, ProfileKey};
pub use protocol::{HostRequest, HostResponse};
pub use state::{NoteSyncController, PopupEvent, SyncState};
pub use ui::NoteView;

use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));
    mount_to_body(Popup);
}
