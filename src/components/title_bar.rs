//! Title Bar Component
//!
//! App header with the profile and the settings toggle.

use leptos::prelude::*;

use crate::context::DataContext;
use crate::store::AppStateStoreFields;

#[component]
pub fn TitleBar(
    data: DataContext,
    show_settings: ReadSignal<bool>,
    set_show_settings: WriteSignal<bool>,
) -> impl IntoView {
    let profile = move || data.store.settings().read().profile.clone();

    view! {
        <header class="titlebar">
            <span class="titlebar-title">"MediReminder"</span>

            <div class="titlebar-profile">
                {move || profile().picture.map(|src| view! {
                    <img class="profile-picture" src=src alt="" />
                })}
                <span class="profile-name">{move || profile().name}</span>
            </div>

            <Show when=move || data.store.load_error().read().is_some()>
                <span class="titlebar-error" title=move || data.store.load_error().get().unwrap_or_default()>
                    "Offline"
                </span>
            </Show>

            <button
                class=move || if show_settings.get() { "titlebar-btn active" } else { "titlebar-btn" }
                title="Settings"
                aria-label="settings"
                on:click=move |_| set_show_settings.update(|v| *v = !*v)
            >
                "⚙"
            </button>
        </header>
    }
}
