//! Unsaved note text, keyed by profile.
//!
//! An entry exists only while there is an edit the host has not confirmed. Every call
//! persists immediately; there is no write batching.

mod chrome;

pub use chrome::ChromeDraftCache;

use crate::error::PopupResult;
use crate::profile::ProfileKey;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

#[allow(async_fn_in_trait)]
pub trait DraftCache {
    /// Upsert the draft for `key`.
    async fn write(&self, key: &ProfileKey, text: &str) -> PopupResult<()>;

    /// `None` means no draft. `Some("")` is a real, empty draft.
    async fn read(&self, key: &ProfileKey) -> PopupResult<Option<String>>;

    /// Removing a missing key is a no-op.
    async fn remove(&self, key: &ProfileKey) -> PopupResult<()>;
}

/// In-process cache. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryDraftCache {
    entries: Rc<RefCell<BTreeMap<ProfileKey, String>>>,
}

impl MemoryDraftCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn peek(&self, key: &ProfileKey) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl DraftCache for MemoryDraftCache {
    async fn write(&self, key: &ProfileKey, text: &str) -> PopupResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.clone(), text.to_string());
        Ok(())
    }

    async fn read(&self, key: &ProfileKey) -> PopupResult<Option<String>> {
        Ok(self.peek(key))
    }

    async fn remove(&self, key: &ProfileKey) -> PopupResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
