use super::{PopupEvent, ReadPurpose, SyncState};
use crate::config::PopupConfig;
use crate::drafts::DraftCache;
use crate::error::{PopupError, PopupResult};
use crate::host::{HostChannel, HostConnector};
use crate::profile::{profile_for_tab, ProfileKey};
use crate::protocol::{HostRequest, HostResponse};
use crate::ui::NoteView;

pub(crate) const STATUS_UNSAVED: &str = "You have unsaved changes.";
pub(crate) const STATUS_SAVED: &str = "Changes saved.";
pub(crate) const STATUS_SAVE_FAILED: &str = "Changes failed to save.";
pub(crate) const STATUS_DISCARDED: &str = "Changes discarded.";
pub(crate) const ERROR_DISCONNECTED: &str = "Lost connection to notes storage.";

/// One popup session: reconciles host state with the draft cache and drives the view.
///
/// Built fresh per activation. Responses are matched to the pending request by mode
/// only, so at most one read and one write are ever in flight.
pub struct NoteSyncController<C, H, V> {
    config: PopupConfig,
    cache: C,
    view: V,
    host: Option<H>,
    profile: Option<ProfileKey>,
    state: SyncState,

    /// What the note field currently shows.
    text: String,

    /// Bumped on every request sent; timeouts carry the number they were armed for.
    request_seq: u64,
}

impl<C, H, V> NoteSyncController<C, H, V>
where
    C: DraftCache,
    H: HostChannel,
    V: NoteView,
{
    pub fn new(config: PopupConfig, cache: C, view: V) -> Self {
        Self {
            config,
            cache,
            view,
            host: None,
            profile: None,
            state: SyncState::Uninitialized,
            text: String::new(),
            request_seq: 0,
        }
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn profile(&self) -> Option<&ProfileKey> {
        self.profile.as_ref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Sequence number of the outstanding request, if one is pending.
    pub fn pending_request(&self) -> Option<u64> {
        self.state.is_awaiting().then_some(self.request_seq)
    }

    /// Check the active tab and, for a profile page, connect and request its note.
    ///
    /// Runs once; `tab_url` is `None` when the browser gave no URL.
    pub fn activate<K>(&mut self, tab_url: Option<&str>, connector: &K)
    where
        K: HostConnector<Channel = H>,
    {
        if self.state != SyncState::Uninitialized {
            log::warn!("activate called in state {}; ignoring", self.state.name());
            return;
        }

        let key = match tab_url.map(|url| profile_for_tab(url, &self.config.site_host)) {
            Some(Ok(key)) => key,
            Some(Err(reason)) => {
                log::info!("active tab is not a profile page ({reason:?})");
                self.state = SyncState::NotApplicable;
                self.view.show_not_applicable();
                return;
            }
            None => {
                log::info!("active tab has no URL");
                self.state = SyncState::NotApplicable;
                self.view.show_not_applicable();
                return;
            }
        };
        log::info!("active tab is profile {key}");

        self.view.set_editable(false);
        self.view.set_controls_enabled(false);
        self.view.set_busy(true);

        match connector.connect(&self.config.host_name) {
            Ok(channel) => self.host = Some(channel),
            Err(e) => {
                self.fail(e);
                return;
            }
        }

        let request = HostRequest::read(&key);
        self.profile = Some(key);
        if let Err(e) = self.send(&request) {
            self.fail(e);
            return;
        }
        self.state = SyncState::AwaitingRead(ReadPurpose::Initial);
    }

    /// Apply one event. Errors are reported to the view, never returned.
    pub async fn handle(&mut self, event: PopupEvent) {
        if self.state.is_terminal() || self.state == SyncState::Uninitialized {
            log::warn!("ignoring {event:?} in state {}", self.state.name());
            return;
        }

        let result = match event {
            PopupEvent::Host(response) => self.on_response(response).await,
            PopupEvent::Disconnected { reason } => {
                self.on_disconnect(reason);
                Ok(())
            }
            PopupEvent::Edited(text) => self.on_edit(text).await,
            PopupEvent::SaveRequested => self.save(),
            PopupEvent::DiscardRequested => self.discard().await,
            PopupEvent::ResponseTimeout(seq) => {
                self.on_timeout(seq);
                Ok(())
            }
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    async fn on_response(&mut self, response: HostResponse) -> PopupResult<()> {
        log::debug!("host response {response:?} in state {}", self.state.name());
        let pending = self.state.clone();
        match (response, pending) {
            (HostResponse::Read { payload }, SyncState::AwaitingRead(purpose)) => {
                self.on_read(payload.text, purpose).await
            }
            (HostResponse::Write { payload }, SyncState::AwaitingSave { sent }) => {
                self.on_write(payload.success, sent).await
            }
            (HostResponse::Unknown, _) => {
                log::warn!("ignoring host response with unknown mode");
                Ok(())
            }
            (response, state) => {
                log::warn!(
                    "ignoring unexpected {response:?} in state {}",
                    state.name()
                );
                Ok(())
            }
        }
    }

    async fn on_read(
        &mut self,
        host_text: Option<String>,
        purpose: ReadPurpose,
    ) -> PopupResult<()> {
        let key = self.key()?;

        match purpose {
            ReadPurpose::Initial => {
                // Not seeing a draft that exists would let the next edit clobber it.
                let draft = match self.cache.read(&key).await {
                    Ok(draft) => draft,
                    Err(e) => {
                        self.fail(e);
                        return Ok(());
                    }
                };

                match draft {
                    Some(draft) => {
                        log::info!("restoring unsaved draft for {key}");
                        self.view.show_text(&draft);
                        self.text = draft;
                        self.view.show_status(STATUS_UNSAVED);
                        self.view.set_controls_enabled(true);
                        self.state = SyncState::Dirty;
                    }
                    None => {
                        self.show_host_text(host_text);
                        self.view.set_controls_enabled(false);
                        self.state = SyncState::Clean;
                    }
                }
            }
            ReadPurpose::Discard => {
                self.show_host_text(host_text);
                self.view.show_status(STATUS_DISCARDED);
                self.view.set_controls_enabled(false);
                self.state = SyncState::Clean;
            }
        }

        self.view.set_busy(false);
        self.view.set_editable(true);
        Ok(())
    }

    fn show_host_text(&mut self, host_text: Option<String>) {
        match host_text.filter(|t| !t.trim().is_empty()) {
            Some(text) => {
                self.view.show_text(&text);
                self.text = text;
            }
            None => {
                self.view.show_placeholder(&self.config.placeholder);
                self.text.clear();
            }
        }
    }

    async fn on_write(&mut self, success: bool, sent: String) -> PopupResult<()> {
        let key = self.key()?;
        self.view.set_busy(false);

        if !success {
            log::warn!("host failed to save note for {key}; draft kept");
            self.state = SyncState::Dirty;
            self.view.show_status(STATUS_SAVE_FAILED);
            self.view.set_controls_enabled(true);
            return Ok(());
        }

        if self.text != sent {
            // Edited while the save was in flight; the newer text is already cached.
            log::info!("saved note for {key}; newer edits still pending");
            self.state = SyncState::Dirty;
            self.view.show_status(STATUS_UNSAVED);
            self.view.set_controls_enabled(true);
            return Ok(());
        }

        if let Err(e) = self.cache.remove(&key).await {
            // Host has the text but the draft would resurface on the next open.
            self.state = SyncState::Dirty;
            self.view.show_status(STATUS_UNSAVED);
            self.view.set_controls_enabled(true);
            return Err(e);
        }

        log::info!("saved note for {key}");
        self.state = SyncState::Clean;
        self.view.show_status(STATUS_SAVED);
        self.view.set_controls_enabled(false);
        Ok(())
    }

    async fn on_edit(&mut self, text: String) -> PopupResult<()> {
        let saving = match self.state {
            SyncState::Clean | SyncState::Dirty => false,
            SyncState::AwaitingSave { .. } => true,
            _ => {
                log::warn!("ignoring edit in state {}", self.state.name());
                return Ok(());
            }
        };

        let key = self.key()?;
        self.text = text;
        // While saving, status and controls wait for the write response.
        if !saving {
            self.state = SyncState::Dirty;
            self.view.set_controls_enabled(true);
            self.view.show_status(STATUS_UNSAVED);
        }
        self.cache.write(&key, &self.text).await
    }

    fn save(&mut self) -> PopupResult<()> {
        if self.state != SyncState::Dirty {
            log::warn!("ignoring save in state {}", self.state.name());
            return Ok(());
        }

        let key = self.key()?;
        self.send(&HostRequest::write(&key, &self.text))?;
        self.state = SyncState::AwaitingSave {
            sent: self.text.clone(),
        };
        self.view.set_controls_enabled(false);
        self.view.set_busy(true);
        Ok(())
    }

    async fn discard(&mut self) -> PopupResult<()> {
        if self.state != SyncState::Dirty {
            log::warn!("ignoring discard in state {}", self.state.name());
            return Ok(());
        }

        let key = self.key()?;
        log::info!("discarding draft for {key}");
        self.cache.remove(&key).await?;
        self.send(&HostRequest::read(&key))?;
        self.state = SyncState::AwaitingRead(ReadPurpose::Discard);
        self.view.set_editable(false);
        self.view.set_controls_enabled(false);
        self.view.set_busy(true);
        Ok(())
    }

    fn on_disconnect(&mut self, reason: Option<String>) {
        let message = match reason {
            Some(reason) => format!("{ERROR_DISCONNECTED} {reason}"),
            None => ERROR_DISCONNECTED.to_string(),
        };
        self.fail(PopupError::disconnected(message));
    }

    fn on_timeout(&mut self, seq: u64) {
        if self.pending_request() != Some(seq) {
            log::debug!("stale timeout for request {seq}");
            return;
        }
        self.fail(PopupError::timeout(self.config.response_timeout_ms));
    }

    fn send(&mut self, request: &HostRequest) -> PopupResult<()> {
        let host = self
            .host
            .as_mut()
            .filter(|h| h.is_connected())
            .ok_or_else(|| PopupError::disconnected(ERROR_DISCONNECTED))?;
        host.post(request)?;
        self.request_seq += 1;
        log::debug!("sent request {} for {}", self.request_seq, request.profile());
        Ok(())
    }

    fn key(&self) -> PopupResult<ProfileKey> {
        self.profile
            .clone()
            .ok_or_else(|| PopupError::protocol("no active profile"))
    }

    fn report(&mut self, e: PopupError) {
        if e.is_terminal() {
            self.fail(e);
        } else {
            log::error!("{e}");
            self.view.show_error(&e.message);
        }
    }

    fn fail(&mut self, e: PopupError) {
        log::error!("notes session failed: {e}");
        self.host = None;
        self.state = SyncState::Failed(e.message.clone());
        self.view.set_busy(false);
        self.view.set_editable(false);
        self.view.set_controls_enabled(false);
        self.view.show_error(&e.message);
    }
}
