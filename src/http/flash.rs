//! One-shot message store for the POST-redirect-GET cycle.
//!
//! Messages deposited alongside a redirect are consumed by the next render of
//! the list page and are gone after that. State lives in-process, matching the
//! single-instance deployment of this app (no session keying).

use std::sync::{Arc, Mutex};

use crate::domain::message::ResultMessages;

#[derive(Clone, Default)]
pub struct FlashStore {
    slot: Arc<Mutex<Option<ResultMessages>>>,
}

impl FlashStore {
    pub fn set(&self, messages: ResultMessages) {
        *self.slot.lock().unwrap() = Some(messages);
    }

    /// Consumes the pending messages, if any. A second call returns `None`.
    pub fn take(&self) -> Option<ResultMessages> {
        self.slot.lock().unwrap().take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_is_one_shot() {
        let flash = FlashStore::default();
        assert!(flash.take().is_none());

        flash.set(ResultMessages::success().add("Finished successfully!"));
        let taken = flash.take().unwrap();
        assert_eq!(taken.list[0].text, "Finished successfully!");
        assert!(flash.take().is_none());
    }

    #[test]
    fn set_replaces_pending_messages() {
        let flash = FlashStore::default();
        flash.set(ResultMessages::success().add("old"));
        flash.set(ResultMessages::success().add("new"));
        assert_eq!(flash.take().unwrap().list[0].text, "new");
    }
}
