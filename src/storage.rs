//! Local storage persistence for settings and snoozes.

use gloo_storage::{LocalStorage, Storage};
use reminder_core::{Settings, SnoozeRecord};

pub const SETTINGS_KEY: &str = "settings";
pub const SNOOZES_KEY: &str = "snoozedMedications";

/// Saved settings, or defaults when missing or unreadable
pub fn load_settings() -> Settings {
    LocalStorage::get(SETTINGS_KEY).unwrap_or_default()
}

pub fn save_settings(settings: &Settings) {
    if let Err(e) = LocalStorage::set(SETTINGS_KEY, settings) {
        web_sys::console::warn_1(&format!("[STORAGE] Failed to save settings: {}", e).into());
    }
}

pub fn load_snoozes() -> Vec<SnoozeRecord> {
    LocalStorage::get(SNOOZES_KEY).unwrap_or_default()
}

pub fn save_snoozes(snoozes: &[SnoozeRecord]) {
    if let Err(e) = LocalStorage::set(SNOOZES_KEY, snoozes) {
        web_sys::console::warn_1(&format!("[STORAGE] Failed to save snoozes: {}", e).into());
    }
}
