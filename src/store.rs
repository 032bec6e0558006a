//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;
use reminder_core::{HistoryEntry, Medication, Settings, SnoozeRecord};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Medications as last returned by the server
    pub medications: Vec<Medication>,
    /// Global history log, oldest first
    pub history: Vec<HistoryEntry>,
    /// Local preferences (sound, notifications, theme, profile)
    pub settings: Settings,
    /// Active snoozes, mirrored to local storage
    pub snoozes: Vec<SnoozeRecord>,
    /// Last backend error shown in the header, if any
    pub load_error: Option<String>,
    /// Set once the medication list has been fetched
    pub loaded: bool,
}

impl AppState {
    pub fn new(settings: Settings, snoozes: Vec<SnoozeRecord>) -> Self {
        Self {
            settings,
            snoozes,
            ..Default::default()
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

// ========================
// Store Helper Functions
// ========================

/// Replace a medication in the store by ID
pub fn store_update_medication(store: &AppStore, updated: Medication) {
    if let Some(med) = store.medications().write().iter_mut().find(|m| m.id == updated.id) {
        *med = updated;
    }
}

/// Remove a medication from the store by ID, along with its snooze
pub fn store_remove_medication(store: &AppStore, id: &str) {
    store.medications().write().retain(|m| m.id != id);
    store.snoozes().write().retain(|s| s.id != id);
}

/// Look up a medication by ID without tracking
pub fn store_find_medication(store: &AppStore, id: &str) -> Option<Medication> {
    store.medications().read_untracked().iter().find(|m| m.id == id).cloned()
}

/// Record a snooze, replacing any earlier one for the same medication
pub fn store_set_snooze(store: &AppStore, record: SnoozeRecord) {
    let binding = store.snoozes();
    let mut snoozes = binding.write();
    snoozes.retain(|s| s.id != record.id);
    snoozes.push(record);
}

pub fn store_clear_snooze(store: &AppStore, id: &str) {
    store.snoozes().write().retain(|s| s.id != id);
}
