use leptos::prelude::*;

/// What the sync controller can do to the popup.
pub trait NoteView {
    fn show_text(&mut self, text: &str);

    /// Clear the note field and show `placeholder` in it.
    fn show_placeholder(&mut self, placeholder: &str);

    fn show_status(&mut self, status: &str);

    fn show_error(&mut self, message: &str);

    /// Save and discard buttons.
    fn set_controls_enabled(&mut self, enabled: bool);

    fn set_editable(&mut self, editable: bool);

    /// A host request is in flight.
    fn set_busy(&mut self, busy: bool);

    fn show_not_applicable(&mut self);
}

/// Reactive view state rendered by the popup component.
#[derive(Clone, Copy)]
pub struct SignalView {
    pub text: RwSignal<String>,
    pub placeholder: RwSignal<String>,
    pub status: RwSignal<Option<String>>,
    pub error: RwSignal<Option<String>>,
    pub controls_enabled: RwSignal<bool>,
    pub editable: RwSignal<bool>,
    pub busy: RwSignal<bool>,

    /// `None` until the active tab has been checked.
    pub applicable: RwSignal<Option<bool>>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            text: RwSignal::new(String::new()),
            placeholder: RwSignal::new(String::new()),
            status: RwSignal::new(None),
            error: RwSignal::new(None),
            controls_enabled: RwSignal::new(false),
            editable: RwSignal::new(false),
            busy: RwSignal::new(false),
            applicable: RwSignal::new(None),
        }
    }
}

impl Default for SignalView {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteView for SignalView {
    fn show_text(&mut self, text: &str) {
        self.applicable.set(Some(true));
        self.text.set(text.to_string());
    }

    fn show_placeholder(&mut self, placeholder: &str) {
        self.applicable.set(Some(true));
        self.text.set(String::new());
        self.placeholder.set(placeholder.to_string());
    }

    fn show_status(&mut self, status: &str) {
        self.error.set(None);
        self.status.set(Some(status.to_string()));
    }

    fn show_error(&mut self, message: &str) {
        self.error.set(Some(message.to_string()));
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled.set(enabled);
    }

    fn set_editable(&mut self, editable: bool) {
        self.editable.set(editable);
    }

    fn set_busy(&mut self, busy: bool) {
        self.applicable.set(Some(true));
        self.busy.set(busy);
    }

    fn show_not_applicable(&mut self) {
        self.applicable.set(Some(false));
    }
}
