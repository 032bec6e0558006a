//! Browser notifications for due medications.

use reminder_core::Medication;
use web_sys::{Notification, NotificationOptions, NotificationPermission};

pub const TITLE: &str = "Time to take your medication!";

pub fn body(medication: &Medication) -> String {
    format!("It's time to take {} - {}", medication.name, medication.dosage)
}

/// Ask once at startup; the answer is remembered by the browser
pub fn request_permission() {
    if Notification::permission() != NotificationPermission::Default {
        return;
    }
    if let Err(e) = Notification::request_permission() {
        web_sys::console::warn_2(&"[NOTIFY] Permission request failed:".into(), &e);
    }
}

pub fn show(medication: &Medication) {
    if Notification::permission() != NotificationPermission::Granted {
        return;
    }
    let options = NotificationOptions::new();
    options.set_body(&body(medication));
    options.set_icon("/favicon.ico");
    if let Err(e) = Notification::new_with_options(TITLE, &options) {
        web_sys::console::warn_2(&"[NOTIFY] Failed to show notification:".into(), &e);
    }
}
