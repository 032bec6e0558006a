//! MediReminder Frontend App
//!
//! Medication list, add/edit dialog, settings view and the alarm overlay.

use std::rc::Rc;

use chrono::{Local, NaiveDateTime};
use gloo_timers::callback::Interval;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;
use reminder_core::Medication;

use crate::commands::HttpBackend;
use crate::components::{AlarmAlert, MedicationCard, MedicationForm, SettingsView, TitleBar};
use crate::context::DataContext;
use crate::notifications;
use crate::reminders::Reminders;
use crate::storage;
use crate::store::{AppState, AppStateStoreFields};
use crate::theme;

/// Add/edit dialog state
#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    New,
    Edit(Medication),
}

#[component]
pub fn App() -> impl IntoView {
    let store = Store::new(AppState::new(storage::load_settings(), storage::load_snoozes()));
    let data = DataContext::new(store, Rc::new(HttpBackend::default()));
    let reminders = Reminders::new(data);

    let (show_settings, set_show_settings) = signal(false);
    let (form_target, set_form_target) = signal::<Option<FormTarget>>(None);

    // Wall clock for "next alarm" labels
    let (clock, set_clock) = signal(now());
    Interval::new(30_000, move || set_clock.set(now())).forget();

    notifications::request_permission();

    // Load data on mount
    spawn_local(async move {
        if let Err(e) = data.load().await {
            store.load_error().set(Some(e));
        }
    });

    // Re-evaluate reminders whenever the medication list changes
    Effect::new(move |_| {
        store.medications().track();
        reminders.check();
    });

    // Apply theme colors
    Effect::new(move |_| {
        theme::apply_theme(&store.settings().read().theme);
    });

    let on_edit = Callback::new(move |med: Medication| set_form_target.set(Some(FormTarget::Edit(med))));
    let close_form = Callback::new(move |_: ()| set_form_target.set(None));
    let close_settings = Callback::new(move |_: ()| set_show_settings.set(false));

    view! {
        <div class="app-layout">
            <TitleBar data=data show_settings=show_settings set_show_settings=set_show_settings />

            <main class="main-content">
                <Show
                    when=move || !show_settings.get()
                    fallback=move || view! { <SettingsView data=data on_close=close_settings /> }
                >
                    <div class="section-header">
                        <h2>"My Medications"</h2>
                        <button class="btn primary" on:click=move |_| set_form_target.set(Some(FormTarget::New))>
                            "Add Medication"
                        </button>
                    </div>

                    <Show
                        when=move || !store.medications().read().is_empty()
                        fallback=move || view! {
                            <div class="empty-state">
                                <p>"No medications added yet."</p>
                                <button class="btn primary" on:click=move |_| set_form_target.set(Some(FormTarget::New))>
                                    "Add Your First Medication"
                                </button>
                            </div>
                        }
                    >
                        <div class="medication-grid">
                            <For
                                each={move || store.medications().read().iter().map(|m| m.id.clone()).collect::<Vec<_>>()}
                                key=|id| id.clone()
                                children=move |id| view! {
                                    <MedicationCard
                                        data=data
                                        reminders=reminders
                                        id=id
                                        clock=clock
                                        on_edit=on_edit
                                    />
                                }
                            />
                        </div>
                    </Show>
                </Show>
            </main>

            {move || form_target.get().map(|target| {
                let editing = match target {
                    FormTarget::New => None,
                    FormTarget::Edit(med) => Some(med),
                };
                view! { <MedicationForm data=data editing=editing on_close=close_form /> }
            })}

            <AlarmAlert data=data reminders=reminders />
        </div>
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
