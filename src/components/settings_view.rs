//! Settings View Component
//!
//! Alarm sound, notifications, profile, theme colors and history.

use leptos::prelude::*;
use reminder_core::{Settings, Theme, ALARM_SOUNDS};

use crate::audio;
use crate::components::HistoryList;
use crate::context::DataContext;
use crate::store::AppStateStoreFields;

/// Theme fields shown as color pickers
const THEME_FIELDS: &[(&str, fn(&mut Theme) -> &mut String)] = &[
    ("Primary", |t| &mut t.primary),
    ("Secondary", |t| &mut t.secondary),
    ("Background", |t| &mut t.background),
    ("Text", |t| &mut t.text),
    ("Alarm", |t| &mut t.alarm),
];

#[component]
pub fn SettingsView(data: DataContext, on_close: Callback<()>) -> impl IntoView {
    let settings = move || data.store.settings().get();

    // Edit a copy and write the whole value back so it is persisted
    let edit = move |f: &dyn Fn(&mut Settings)| {
        let mut next = data.store.settings().get_untracked();
        f(&mut next);
        data.update_settings(next);
    };

    view! {
        <div class="settings-view">
            <div class="section-header">
                <h2>"Settings"</h2>
                <button class="btn" on:click=move |_| on_close.run(())>"Back"</button>
            </div>

            <section class="settings-section">
                <h3>"Alarm Sound"</h3>
                {ALARM_SOUNDS.iter().map(|sound| {
                    let id = sound.id;
                    view! {
                        <label class="radio-row">
                            <input
                                type="radio"
                                name="alarm-sound"
                                value=id
                                prop:checked=move || settings().alarm_sound == id
                                on:change=move |_| {
                                    edit(&|s: &mut Settings| s.alarm_sound = id.to_string());
                                    audio::preview(id);
                                }
                            />
                            <span>{sound.name}</span>
                        </label>
                    }
                }).collect_view()}
            </section>

            <section class="settings-section">
                <h3>"Notifications"</h3>
                <label class="field checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || settings().notification_enabled
                        on:change=move |ev| {
                            let enabled = event_target_checked(&ev);
                            edit(&|s: &mut Settings| s.notification_enabled = enabled);
                        }
                    />
                    <span>"Show browser notifications when a dose is due"</span>
                </label>
            </section>

            <section class="settings-section">
                <h3>"Profile"</h3>
                <label class="field">
                    <span>"Name"</span>
                    <input
                        type="text"
                        prop:value=move || settings().profile.name
                        on:change=move |ev| {
                            let name = event_target_value(&ev);
                            edit(&|s: &mut Settings| s.profile.name = name.clone());
                        }
                    />
                </label>
                <label class="field">
                    <span>"Picture URL"</span>
                    <input
                        type="url"
                        prop:value=move || settings().profile.picture.unwrap_or_default()
                        on:change=move |ev| {
                            let url = event_target_value(&ev);
                            let picture = Some(url.trim().to_string()).filter(|u| !u.is_empty());
                            edit(&|s: &mut Settings| s.profile.picture = picture.clone());
                        }
                    />
                </label>
            </section>

            <section class="settings-section">
                <h3>"Theme"</h3>
                <div class="theme-grid">
                    {THEME_FIELDS.iter().map(|&(label, field)| view! {
                        <label class="field color">
                            <span>{label}</span>
                            <input
                                type="color"
                                prop:value=move || {
                                    let mut theme = settings().theme;
                                    field(&mut theme).clone()
                                }
                                on:input=move |ev| {
                                    let color = event_target_value(&ev);
                                    edit(&|s: &mut Settings| *field(&mut s.theme) = color.clone());
                                }
                            />
                        </label>
                    }).collect_view()}
                </div>
                <button
                    class="btn"
                    on:click=move |_| edit(&|s: &mut Settings| s.theme = Theme::default())
                >
                    "Reset Colors"
                </button>
            </section>

            <HistoryList data=data />
        </div>
    }
}
