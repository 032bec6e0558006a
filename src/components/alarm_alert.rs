//! Alarm Alert Component
//!
//! Modal shown while a reminder is active. Owns the looping sound and the
//! elapsed-time ticker; both stop when the dialog unmounts.

use chrono::Utc;
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use reminder_core::{format_elapsed, AlarmChoice, SNOOZE_CHOICES};

use crate::audio::AlarmAudio;
use crate::context::DataContext;
use crate::reminders::Reminders;
use crate::store::{store_find_medication, AppStateStoreFields};

/// Mounts a fresh dialog for each active reminder
#[component]
pub fn AlarmAlert(data: DataContext, reminders: Reminders) -> impl IntoView {
    let active_id = Memo::new(move |_| {
        reminders
            .alarm
            .read()
            .as_ref()
            .map(|s| s.medication_id().to_string())
    });

    move || {
        active_id
            .get()
            .map(|id| view! { <AlarmDialog data=data reminders=reminders id=id /> })
    }
}

#[component]
fn AlarmDialog(data: DataContext, reminders: Reminders, id: String) -> impl IntoView {
    let Some(medication) = store_find_medication(&data.store, &id) else {
        return None;
    };

    let global_sound = data.store.settings().read_untracked().alarm_sound.clone();
    let audio = StoredValue::new_local(AlarmAudio::looping(medication.alarm_sound(&global_sound)));
    audio.with_value(|a| {
        if let Some(a) = a {
            a.play();
        }
    });

    let alarm = reminders.alarm;
    let (elapsed, set_elapsed) = signal(format_elapsed(0));
    let ticker = StoredValue::new_local(Some(Interval::new(1_000, move || {
        if let Some(label) = alarm.with_untracked(|a| a.as_ref().map(|s| s.elapsed_label(Utc::now()))) {
            set_elapsed.set(label);
        }
    })));

    // Sound follows the dialog state: silent while muted or while a callback runs
    Effect::new(move |_| {
        let (ringing, muted) = alarm
            .read()
            .as_ref()
            .map(|s| (s.is_ringing(), s.is_muted()))
            .unwrap_or((false, true));
        audio.with_value(|a| {
            if let Some(a) = a {
                a.set_muted(muted || !ringing);
            }
        });
    });

    on_cleanup(move || {
        ticker.try_update_value(|t| t.take());
        audio.try_update_value(|a| {
            if let Some(a) = a.take() {
                a.stop();
            }
        });
    });

    let busy = move || alarm.read().as_ref().is_some_and(|s| s.is_busy());
    let muted = move || alarm.read().as_ref().is_some_and(|s| s.is_muted());
    let error = move || alarm.read().as_ref().and_then(|s| s.error().map(str::to_string));

    let toggle_mute = move |_| {
        alarm.update(|a| {
            if let Some(s) = a {
                s.toggle_mute();
            }
        });
    };

    Some(view! {
        <div class="modal-backdrop alarm-backdrop">
            <div class="modal alarm-alert" role="alertdialog">
                <div class="modal-header">
                    <h2>"Medication Reminder"</h2>
                    <button
                        class="icon-btn"
                        title=move || if muted() { "Unmute" } else { "Mute" }
                        on:click=toggle_mute
                    >
                        {move || if muted() { "🔇" } else { "🔊" }}
                    </button>
                </div>

                <div class="alarm-body">
                    <p class="alarm-name">{medication.name.clone()}</p>
                    <p class="alarm-dosage">{medication.dosage.clone()}</p>
                    <p class="alarm-elapsed">"Time elapsed: " {move || elapsed.get()}</p>
                </div>

                {move || error().map(|e| view! { <p class="error-text">{e}</p> })}

                <div class="alarm-actions">
                    <button
                        class="btn primary large"
                        disabled=busy
                        on:click=move |_| reminders.choose(AlarmChoice::Taken)
                    >
                        "Mark as Taken"
                    </button>
                    <div class="snooze-row">
                        {SNOOZE_CHOICES.iter().map(|&minutes| view! {
                            <button
                                class="btn"
                                disabled=busy
                                on:click=move |_| reminders.choose(AlarmChoice::Snooze(minutes))
                            >
                                {format!("Snooze {}m", minutes)}
                            </button>
                        }).collect_view()}
                    </div>
                    <button class="btn subtle" disabled=busy on:click=move |_| reminders.dismiss()>
                        "Dismiss"
                    </button>
                </div>
            </div>
        </div>
    })
}
