pub(crate) mod note_sync;

pub use note_sync::NoteSyncController;

use crate::protocol::HostResponse;
use futures::channel::mpsc::UnboundedSender;

/// Why a read is outstanding. A discard refetch skips the draft check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadPurpose {
    Initial,
    Discard,
}

#[derive(Clone, Debug, PartialEq, Eq, strum::IntoStaticStr)]
pub enum SyncState {
    Uninitialized,
    /// Active tab is not a profile page. Terminal.
    NotApplicable,
    AwaitingRead(ReadPurpose),
    /// Field matches the last value the host confirmed.
    Clean,
    /// Field holds an edit the host has not confirmed; it is in the draft cache.
    Dirty,
    /// A write is in flight carrying `sent`.
    AwaitingSave { sent: String },
    /// Host gone or unresponsive. Terminal until the popup is reopened.
    Failed(String),
}

impl SyncState {
    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NotApplicable | Self::Failed(_))
    }

    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingRead(_) | Self::AwaitingSave { .. })
    }
}

/// Everything that can happen to a popup session after activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PopupEvent {
    Host(HostResponse),
    Disconnected { reason: Option<String> },
    /// Note field changed; carries the full field text.
    Edited(String),
    SaveRequested,
    DiscardRequested,
    /// Timer armed for request number `seq` fired.
    ResponseTimeout(u64),
}

/// Queue an event for the session; dropped once the session loop has ended.
pub(crate) fn forward(events: &UnboundedSender<PopupEvent>, event: PopupEvent) {
    if events.unbounded_send(event).is_err() {
        log::debug!("popup session ended; dropping event");
    }
}
