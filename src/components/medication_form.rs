//! Medication Form Component
//!
//! Add/edit dialog. Input is kept as raw strings and validated on submit.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reminder_core::{
    Medication, MedicationPatch, MedicationSettings, NewMedication, TimeOfDay, ALARM_SOUNDS,
};

use crate::context::DataContext;

const DEFAULT_TIME: &str = "09:00";
const MAX_FREQUENCY: u32 = 24;

/// Raw form input
#[derive(Clone, Debug, PartialEq)]
pub struct FormValues {
    pub name: String,
    pub dosage: String,
    pub frequency: u32,
    pub times: Vec<String>,
    pub refills: String,
    /// Empty means "use the global sound"
    pub alarm_sound: String,
    pub notification_enabled: bool,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            dosage: String::new(),
            frequency: 1,
            times: vec![DEFAULT_TIME.to_string()],
            refills: String::new(),
            alarm_sound: String::new(),
            notification_enabled: true,
        }
    }
}

impl From<&Medication> for FormValues {
    fn from(med: &Medication) -> Self {
        Self {
            name: med.name.clone(),
            dosage: med.dosage.clone(),
            frequency: med.frequency,
            times: med.times.iter().map(|t| t.to_string()).collect(),
            refills: med.refills.map(|r| r.to_string()).unwrap_or_default(),
            alarm_sound: med.settings.alarm_sound.clone().unwrap_or_default(),
            notification_enabled: med.settings.notification_enabled,
        }
    }
}

impl FormValues {
    pub fn add_time(&mut self) {
        self.times.push(DEFAULT_TIME.to_string());
    }

    /// Remove a time slot; the last one is kept
    pub fn remove_time(&mut self, index: usize) {
        if self.times.len() > 1 && index < self.times.len() {
            self.times.remove(index);
        }
    }

    /// Check every field and build the create body
    pub fn validate(&self) -> Result<NewMedication, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("Medication name is required".to_string());
        }
        let dosage = self.dosage.trim();
        if dosage.is_empty() {
            return Err("Dosage is required".to_string());
        }
        if !(1..=MAX_FREQUENCY).contains(&self.frequency) {
            return Err(format!("Times per day must be between 1 and {}", MAX_FREQUENCY));
        }

        let times = self
            .times
            .iter()
            .map(|raw| raw.parse::<TimeOfDay>().map_err(|_| format!("Invalid time: {}", raw)))
            .collect::<Result<Vec<_>, _>>()?;
        if times.is_empty() {
            return Err("At least one time is required".to_string());
        }

        let refills = match self.refills.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| "Refills must be a non-negative whole number".to_string())?,
            ),
        };

        let alarm_sound = Some(self.alarm_sound.clone()).filter(|s| !s.is_empty());

        Ok(NewMedication {
            name: name.to_string(),
            dosage: dosage.to_string(),
            frequency: self.frequency,
            times,
            refills,
            settings: MedicationSettings {
                alarm_sound,
                notification_enabled: self.notification_enabled,
            },
        })
    }
}

/// Full replacement patch for an edit; an empty refills field clears the count
pub fn patch_from(new: NewMedication) -> MedicationPatch {
    MedicationPatch {
        name: Some(new.name),
        dosage: Some(new.dosage),
        frequency: Some(new.frequency),
        times: Some(new.times),
        refills: Some(new.refills),
        settings: Some(new.settings),
    }
}

#[component]
pub fn MedicationForm(
    data: DataContext,
    /// Medication being edited, or None to add
    editing: Option<Medication>,
    on_close: Callback<()>,
) -> impl IntoView {
    let title = if editing.is_some() { "Edit Medication" } else { "Add Medication" };
    let editing_id = editing.as_ref().map(|m| m.id.clone());
    let form = RwSignal::new(editing.as_ref().map(FormValues::from).unwrap_or_default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);
    // Rows are rebuilt only when a slot is added or removed, so typing keeps focus
    let time_count = Memo::new(move |_| form.read().times.len());

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let new = match form.with_untracked(FormValues::validate) {
            Ok(new) => new,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };

        set_error.set(None);
        set_saving.set(true);
        let editing_id = editing_id.clone();
        spawn_local(async move {
            let result = match editing_id {
                Some(id) => data.update_medication(&id, patch_from(new)).await.map(drop),
                None => data.add_medication(new).await.map(drop),
            };
            set_saving.set(false);
            match result {
                Ok(()) => on_close.run(()),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="modal-backdrop">
            <form class="modal medication-form" on:submit=submit>
                <div class="modal-header">
                    <h2>{title}</h2>
                    <button type="button" class="icon-btn" title="Close" on:click=move |_| on_close.run(())>
                        "✕"
                    </button>
                </div>

                <label class="field">
                    <span>"Medication Name"</span>
                    <input
                        type="text"
                        required
                        prop:value=move || form.read().name.clone()
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                </label>

                <label class="field">
                    <span>"Dosage"</span>
                    <input
                        type="text"
                        required
                        prop:value=move || form.read().dosage.clone()
                        on:input=move |ev| form.update(|f| f.dosage = event_target_value(&ev))
                    />
                </label>

                <label class="field">
                    <span>"Times per Day"</span>
                    <select
                        prop:value=move || form.read().frequency.to_string()
                        on:change=move |ev| {
                            if let Ok(n) = event_target_value(&ev).parse() {
                                form.update(|f| f.frequency = n);
                            }
                        }
                    >
                        {(1..=MAX_FREQUENCY).map(|n| view! {
                            <option value=n.to_string()>{n}</option>
                        }).collect_view()}
                    </select>
                </label>

                <div class="field">
                    <span>"Times"</span>
                    {move || {
                        (0..time_count.get()).map(|index| view! {
                            <div class="time-row">
                                <input
                                    type="time"
                                    prop:value=move || form.read().times.get(index).cloned().unwrap_or_default()
                                    on:input=move |ev| form.update(|f| {
                                        if let Some(slot) = f.times.get_mut(index) {
                                            *slot = event_target_value(&ev);
                                        }
                                    })
                                />
                                <button
                                    type="button"
                                    class="icon-btn"
                                    title="Remove time"
                                    disabled=move || time_count.get() <= 1
                                    on:click=move |_| form.update(|f| f.remove_time(index))
                                >
                                    "−"
                                </button>
                            </div>
                        }).collect_view()
                    }}
                    <button type="button" class="btn" on:click=move |_| form.update(FormValues::add_time)>
                        "+ Add Time"
                    </button>
                </div>

                <label class="field">
                    <span>"Refills Remaining"</span>
                    <input
                        type="number"
                        min="0"
                        prop:value=move || form.read().refills.clone()
                        on:input=move |ev| form.update(|f| f.refills = event_target_value(&ev))
                    />
                </label>

                <label class="field">
                    <span>"Alarm Sound"</span>
                    <select
                        prop:value=move || form.read().alarm_sound.clone()
                        on:change=move |ev| form.update(|f| f.alarm_sound = event_target_value(&ev))
                    >
                        <option value="">"Use default setting"</option>
                        {ALARM_SOUNDS.iter().map(|sound| view! {
                            <option value=sound.id>{sound.name}</option>
                        }).collect_view()}
                    </select>
                </label>

                <label class="field checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.read().notification_enabled
                        on:change=move |ev| form.update(|f| f.notification_enabled = event_target_checked(&ev))
                    />
                    <span>"Show notifications"</span>
                </label>

                {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}

                <div class="modal-actions">
                    <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="btn primary" disabled=move || saving.get()>
                        {move || if saving.get() { "Saving..." } else { "Save" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
