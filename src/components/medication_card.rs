//! Medication Card Component
//!
//! One medication: schedule, next alarm, refills and quick actions.

use chrono::NaiveDateTime;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reminder_core::Medication;

use crate::components::DeleteConfirmButton;
use crate::context::DataContext;
use crate::reminders::Reminders;
use crate::store::AppStateStoreFields;

/// "Next alarm" label, `HH:MM` or a dash when nothing is scheduled
pub fn next_alarm_label(medication: &Medication, now: NaiveDateTime) -> String {
    medication
        .next_reminder(now)
        .map(|at| at.format("%H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub fn MedicationCard(
    data: DataContext,
    reminders: Reminders,
    #[prop(into)] id: String,
    clock: ReadSignal<NaiveDateTime>,
    on_edit: Callback<Medication>,
) -> impl IntoView {
    let (busy, set_busy) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);

    let med_id = StoredValue::new(id);
    let medication = Memo::new(move |_| {
        let id = med_id.get_value();
        data.store.medications().read().iter().find(|m| m.id == id).cloned()
    });

    let snoozed_until = move || {
        let id = med_id.get_value();
        data.store
            .snoozes()
            .read()
            .iter()
            .find(|s| s.id == id)
            .and_then(|s| s.local_wake_at())
            .map(|at| at.format("%H:%M").to_string())
    };

    let run_action = move |taken: bool| {
        if busy.get_untracked() {
            return;
        }
        set_busy.set(true);
        set_error.set(None);
        let id = med_id.get_value();
        spawn_local(async move {
            let result = if taken {
                reminders.take(&id).await
            } else {
                reminders.skip(&id).await
            };
            if let Err(e) = result {
                set_error.set(Some(e));
            }
            set_busy.set(false);
        });
    };

    let delete = move |_| {
        let id = med_id.get_value();
        spawn_local(async move {
            if let Err(e) = data.delete_medication(&id).await {
                set_error.set(Some(e));
            }
        });
    };

    move || {
        medication.get().map(|med| {
            let refills = med.refills;
            let low = med.refills_low();
            let times = med.times.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ");
            let edit_med = med.clone();

            view! {
                <div class="medication-card">
                    <div class="card-header">
                        <h3 class="card-title">{med.name.clone()}</h3>
                        <span class="card-dosage">{med.dosage.clone()}</span>
                    </div>

                    <div class="card-body">
                        <div class="card-row">
                            <span class="card-label">"Times"</span>
                            <span>{times}</span>
                        </div>
                        <div class="card-row">
                            <span class="card-label">"Next alarm"</span>
                            <span class="next-alarm">
                                {move || medication.get().map(|m| next_alarm_label(&m, clock.get()))}
                            </span>
                        </div>
                        {refills.map(|count| view! {
                            <div class="card-row">
                                <span class="card-label">"Refills left"</span>
                                <span class=if low { "refills low" } else { "refills" }>{count}</span>
                            </div>
                        })}
                        {move || snoozed_until().map(|at| view! {
                            <div class="card-row snoozed">"Snoozed until " {at}</div>
                        })}
                    </div>

                    {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}

                    <div class="card-actions">
                        <button
                            class="btn primary"
                            disabled=move || busy.get()
                            on:click=move |_| run_action(true)
                        >
                            "Mark as taken"
                        </button>
                        <button
                            class="btn"
                            disabled=move || busy.get()
                            on:click=move |_| run_action(false)
                        >
                            "Skip"
                        </button>
                        <button class="btn" on:click=move |_| on_edit.run(edit_med.clone())>
                            "Edit"
                        </button>
                        <DeleteConfirmButton button_class="btn danger" on_confirm=delete />
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use reminder_core::{MedicationSettings, NewMedication};

    fn med(times: &[&str]) -> Medication {
        let new = NewMedication {
            name: "Vitamin D".to_string(),
            dosage: "1000 IU".to_string(),
            frequency: times.len() as u32,
            times: times.iter().map(|s| s.parse().unwrap()).collect(),
            refills: None,
            settings: MedicationSettings::default(),
        };
        Medication::create("m1".to_string(), new, Utc::now()).unwrap()
    }

    #[test]
    fn test_next_alarm_label_wraps_to_tomorrow() {
        let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(22, 0, 0).unwrap();
        assert_eq!(next_alarm_label(&med(&["08:00", "21:00"]), now), "08:00");
        assert_eq!(next_alarm_label(&med(&["08:00", "23:30"]), now), "23:30");
    }
}
