mod tabs;

use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, ErrorBanner, Label, NoteField, Panel, PanelDescription,
    PanelFooter, PanelHeader, PanelTitle, Spinner, StatusLine,
};
use crate::config::PopupConfig;
use crate::drafts::{ChromeDraftCache, DraftCache, MemoryDraftCache};
use crate::host::NativeConnector;
use crate::state::{forward, NoteSyncController, PopupEvent};
use crate::storage::LocalStorageDraftCache;
use crate::ui::SignalView;
use crate::util::set_timeout;
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use futures::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Drive one popup session until it reaches a terminal state or the popup closes.
async fn run_session(
    config: PopupConfig,
    view: SignalView,
    events: UnboundedSender<PopupEvent>,
    inbox: UnboundedReceiver<PopupEvent>,
) {
    let tab_url = match tabs::active_tab_url().await {
        Ok(url) => url,
        Err(e) => {
            log::error!("could not read active tab: {e}");
            None
        }
    };

    if ChromeDraftCache::available() {
        drive(config, ChromeDraftCache, view, tab_url, events, inbox).await
    } else if LocalStorageDraftCache::available() {
        log::warn!("chrome.storage unavailable; keeping drafts in localStorage");
        drive(config, LocalStorageDraftCache, view, tab_url, events, inbox).await
    } else {
        log::warn!("no persistent storage; drafts will not survive closing the popup");
        drive(config, MemoryDraftCache::new(), view, tab_url, events, inbox).await
    }
}

async fn drive<C: DraftCache>(
    config: PopupConfig,
    cache: C,
    view: SignalView,
    tab_url: Option<String>,
    events: UnboundedSender<PopupEvent>,
    mut inbox: UnboundedReceiver<PopupEvent>,
) {
    let connector = NativeConnector::new(events.clone());
    let mut controller = NoteSyncController::new(config.clone(), cache, view);

    controller.activate(tab_url.as_deref(), &connector);
    let mut armed = 0;

    loop {
        if controller.state().is_terminal() {
            log::info!("popup session finished in state {}", controller.state().name());
            break;
        }

        if let Some(seq) = controller.pending_request().filter(|seq| *seq != armed) {
            armed = seq;
            if config.timeout_enabled() {
                let events = events.clone();
                set_timeout(config.response_timeout_ms, move || {
                    forward(&events, PopupEvent::ResponseTimeout(seq));
                });
            }
        }

        let Some(event) = inbox.next().await else {
            break;
        };
        controller.handle(event).await;
    }
}

#[component]
pub fn Popup() -> impl IntoView {
    let config = PopupConfig::from_window();
    let popup = SignalView::new();
    let (events, inbox) = mpsc::unbounded::<PopupEvent>();

    spawn_local(run_session(config, popup, events.clone(), inbox));

    let on_change = {
        let events = events.clone();
        Callback::new(move |text: String| forward(&events, PopupEvent::Edited(text)))
    };
    let on_save = {
        let events = events.clone();
        Callback::new(move |_: web_sys::MouseEvent| {
            forward(&events, PopupEvent::SaveRequested)
        })
    };
    let on_discard = Callback::new(move |_: web_sys::MouseEvent| {
        forward(&events, PopupEvent::DiscardRequested)
    });

    view! {
        <Panel>
            <PanelHeader>
                <PanelTitle>"Profile notes"</PanelTitle>
                <Show when=move || popup.busy.get() fallback=|| ().into_view()>
                    <Spinner />
                </Show>
            </PanelHeader>

            <Show
                when=move || popup.applicable.get() != Some(false)
                fallback=|| view! {
                    <PanelDescription>"Open a LinkedIn profile page to view or add notes."</PanelDescription>
                }
            >
                <div class="flex flex-col gap-2">
                    <Label html_for="notes-field">"Your note"</Label>
                    <NoteField
                        id="notes-field"
                        value=popup.text
                        placeholder=popup.placeholder
                        disabled=Signal::derive(move || !popup.editable.get())
                        on_change=on_change
                    />
                </div>

                <StatusLine>{move || popup.status.get().unwrap_or_default()}</StatusLine>

                {move || {
                    popup.error.get().map(|e| view! { <ErrorBanner>{e}</ErrorBanner> })
                }}

                <PanelFooter>
                    <Button
                        variant=ButtonVariant::Outline
                        size=ButtonSize::Sm
                        attr:disabled=move || !popup.controls_enabled.get()
                        on:click=move |e| on_discard.run(e)
                    >
                        "Discard"
                    </Button>
                    <Button
                        size=ButtonSize::Sm
                        attr:disabled=move || !popup.controls_enabled.get()
                        on:click=move |e| on_save.run(e)
                    >
                        "Save"
                    </Button>
                </PanelFooter>
            </Show>
        </Panel>
    }
}
