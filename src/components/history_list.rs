//! History List Component
//!
//! Recorded doses, newest first.

use chrono::Local;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reminder_core::{HistoryEntry, HistoryStatus};

use crate::context::DataContext;
use crate::store::AppStateStoreFields;

/// Entries ordered newest first
pub fn newest_first(history: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let mut entries = history.to_vec();
    entries.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    entries
}

fn status_class(status: HistoryStatus) -> &'static str {
    match status {
        HistoryStatus::Taken => "history-status taken",
        HistoryStatus::Skipped => "history-status skipped",
        HistoryStatus::Snoozed => "history-status snoozed",
    }
}

#[component]
pub fn HistoryList(data: DataContext) -> impl IntoView {
    let (error, set_error) = signal::<Option<String>>(None);
    let (clearing, set_clearing) = signal(false);

    let clear = move |_| {
        set_clearing.set(true);
        spawn_local(async move {
            let result = data.clear_history().await;
            set_clearing.set(false);
            set_error.set(result.err());
        });
    };

    let entries = Memo::new(move |_| newest_first(&data.store.history().read()));

    view! {
        <section class="settings-section history">
            <div class="section-header">
                <h3>"Medication History"</h3>
                <button class="btn danger" disabled=move || clearing.get() on:click=clear>
                    "Clear History"
                </button>
            </div>
            <p class="muted">{move || format!("{} entries in history", entries.read().len())}</p>
            {move || error.get().map(|e| view! { <p class="error-text">{e}</p> })}

            <ul class="history-list">
                <For
                    each=move || entries.get()
                    key=|entry| entry.id.clone()
                    children=move |entry| {
                        let when = entry.taken_at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string();
                        view! {
                            <li class="history-item">
                                <span class="history-name">{entry.medication_name.clone()}</span>
                                <span class=status_class(entry.status)>{entry.describe()}</span>
                                <span class="history-time">{when}</span>
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(id: &str, hour: u32) -> HistoryEntry {
        HistoryEntry {
            id: id.to_string(),
            medication_id: "m1".to_string(),
            medication_name: "Aspirin".to_string(),
            taken_at: Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap(),
            status: HistoryStatus::Taken,
            snooze_duration: None,
        }
    }

    #[test]
    fn test_newest_first() {
        let history = vec![entry("a", 8), entry("b", 20), entry("c", 12)];
        let ids: Vec<String> = newest_first(&history).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }
}
