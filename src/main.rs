//! MediReminder Frontend Entry Point

mod commands;
mod context;
mod store;
mod storage;
mod reminders;
mod audio;
mod notifications;
mod theme;
mod components;
mod app;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(App);
}
