// src/ui/modals.rs
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use crate::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModalKind {
    #[serde(rename = "item")]
    Item,
    #[serde(rename = "signUp")]
    SignUp,
}

#[derive(Debug, Default)]
struct ModalState {
    current: Option<ModalKind>,
    active_item: Option<Item>,
}

/// Which modal is open, shared by every form that can open or dismiss one.
#[derive(Debug, Clone, Default)]
pub struct Modals {
    state: Arc<Mutex<ModalState>>,
}

impl Modals {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ModalState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn open(&self, kind: ModalKind) {
        self.lock().current = Some(kind);
    }

    pub fn open_item(&self, item: Item) {
        let mut state = self.lock();
        state.active_item = Some(item);
        state.current = Some(ModalKind::Item);
    }

    pub fn close(&self) {
        self.lock().current = None;
    }

    pub fn current(&self) -> Option<ModalKind> {
        self.lock().current
    }

    pub fn active_item(&self) -> Option<Item> {
        self.lock().active_item.clone()
    }
}
