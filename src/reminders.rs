//! Reminder Service
//!
//! Drives `ReminderScheduler` from the browser clock. One `Timeout` is armed
//! for the scheduler's next wake time and re-armed after every change; the
//! active alarm is exposed as a signal for the alarm dialog.

use chrono::{Local, NaiveDateTime, Utc};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reminder_core::{
    AlarmChoice, AlarmOutcome, AlarmSession, DueCause, DueReminder, Medication, MedicationId,
    ReminderScheduler, SnoozeRecord,
};

use crate::context::DataContext;
use crate::notifications;
use crate::storage;
use crate::store::{store_clear_snooze, store_set_snooze, AppStateStoreFields};

/// Longest sleep between checks, so clock jumps (suspend, DST) are noticed
const MAX_SLEEP_MS: i64 = 60_000;

#[derive(Clone, Copy)]
pub struct Reminders {
    data: DataContext,
    scheduler: StoredValue<ReminderScheduler>,
    timer: StoredValue<Option<Timeout>, LocalStorage>,
    pub alarm: RwSignal<Option<AlarmSession>>,
}

impl Reminders {
    /// Restore persisted snoozes that have not yet expired
    pub fn new(data: DataContext) -> Self {
        let now_ms = Utc::now().timestamp_millis();
        let mut scheduler = ReminderScheduler::new();

        data.store.snoozes().write().retain(|record| !record.is_expired(now_ms));
        for record in data.store.snoozes().get_untracked() {
            if let Some(until) = record.local_wake_at() {
                scheduler.restore_snooze(record.id.clone(), until);
            }
        }
        storage::save_snoozes(&data.store.snoozes().get_untracked());

        Self {
            data,
            scheduler: StoredValue::new(scheduler),
            timer: StoredValue::new_local(None),
            alarm: RwSignal::new(None),
        }
    }

    /// Evaluate due reminders now and re-arm the wake timer.
    ///
    /// Does nothing until the medication list has been loaded, so restored
    /// snoozes are not pruned against an empty list.
    pub fn check(&self) {
        if !self.data.store.loaded().get_untracked() {
            return;
        }
        let medications = self.data.store.medications().get_untracked();
        let now = Local::now().naive_local();

        let raised = self
            .scheduler
            .try_update_value(|s| s.tick(&medications, now))
            .flatten();
        self.close_stale_alarm();
        if let Some(due) = raised {
            self.raise(due, &medications);
        }

        self.prune_snoozes(&medications);
        self.arm(&medications, now);
    }

    fn raise(&self, due: DueReminder, medications: &[Medication]) {
        let Some(medication) = medications.iter().find(|m| m.id == due.medication_id) else {
            return;
        };
        web_sys::console::log_1(
            &format!("[REMINDER] {} due at {} ({:?})", medication.name, due.due_at, due.cause).into(),
        );

        if due.cause == DueCause::SnoozeExpired {
            store_clear_snooze(&self.data.store, &medication.id);
        }

        let notify = self.data.store.settings().read_untracked().notification_enabled;
        if notify && medication.settings.notification_enabled {
            notifications::show(medication);
        }

        self.alarm.set(Some(AlarmSession::new(medication.id.clone(), Utc::now())));
    }

    /// Close the dialog when its medication is no longer the active reminder
    fn close_stale_alarm(&self) {
        let open = self
            .alarm
            .with_untracked(|a| a.as_ref().map(|s| s.medication_id().to_string()));
        let Some(id) = open else {
            return;
        };
        if !self.scheduler.with_value(|s| s.is_active(&id)) {
            web_sys::console::log_1(&format!("[REMINDER] closing alarm for {}", id).into());
            self.alarm.set(None);
        }
    }

    fn arm(&self, medications: &[Medication], now: NaiveDateTime) {
        let wake = self.scheduler.with_value(|s| s.next_wake(medications, now));
        let delay = wake
            .map(|at| (at - now).num_milliseconds().clamp(0, MAX_SLEEP_MS))
            .unwrap_or(MAX_SLEEP_MS);

        let this = *self;
        // Replacing the handle drops (and cancels) the previous timer
        self.timer
            .set_value(Some(Timeout::new(delay as u32, move || this.check())));
    }

    fn prune_snoozes(&self, medications: &[Medication]) {
        let known: Vec<MedicationId> = medications.iter().map(|m| m.id.clone()).collect();
        let now_ms = Utc::now().timestamp_millis();
        let before = self.data.store.snoozes().read_untracked().len();

        reminder_core::prune_snoozes(&mut self.data.store.snoozes().write(), now_ms, &known);

        if self.data.store.snoozes().read_untracked().len() != before {
            storage::save_snoozes(&self.data.store.snoozes().get_untracked());
        }
    }

    // ========================
    // Alarm actions
    // ========================

    /// Run a taken/snooze choice from the alarm dialog
    pub fn choose(&self, choice: AlarmChoice) {
        let started = self.alarm.try_update(|alarm| {
            let session = alarm.as_mut()?;
            session.begin(choice).ok()?;
            Some(session.medication_id().to_string())
        });
        let Some(Some(id)) = started else {
            return;
        };

        let this = *self;
        spawn_local(async move {
            let result = match choice {
                AlarmChoice::Taken => this.data.mark_taken(&id).await.map(drop),
                AlarmChoice::Snooze(minutes) => this.data.snooze(&id, minutes).await.map(drop),
            };
            let outcome = this
                .alarm
                .try_update(|alarm| alarm.as_mut().and_then(|s| s.settle(result)))
                .flatten();
            if let Some(outcome) = outcome {
                this.finish(&id, outcome);
            }
        });
    }

    /// Close the dialog without recording anything
    pub fn dismiss(&self) {
        let outcome = self.alarm.try_update(|alarm| {
            let session = alarm.as_mut()?;
            let outcome = session.dismiss().ok()?;
            Some((session.medication_id().to_string(), outcome))
        });
        if let Some(Some((id, outcome))) = outcome {
            self.finish(&id, outcome);
        }
    }

    fn finish(&self, id: &str, outcome: AlarmOutcome) {
        match outcome {
            AlarmOutcome::Taken | AlarmOutcome::Dismissed => {
                self.scheduler.update_value(|s| {
                    s.acknowledge(id);
                });
            }
            AlarmOutcome::Snoozed(minutes) => self.snooze_locally(id, minutes),
        }
        self.alarm.set(None);
        self.check();
    }

    fn snooze_locally(&self, id: &str, minutes: u32) {
        let now = Local::now().naive_local();
        let until = self
            .scheduler
            .try_update_value(|s| s.snooze(id, minutes, now));
        if let Some(until) = until {
            store_set_snooze(&self.data.store, SnoozeRecord::from_local(id.to_string(), until));
            storage::save_snoozes(&self.data.store.snoozes().get_untracked());
        }
    }

    // ========================
    // Card actions
    // ========================

    /// Mark taken outside the alarm; closes the alarm if it is for `id`
    pub async fn take(&self, id: &str) -> Result<(), String> {
        self.data.mark_taken(id).await?;
        self.settle_outside_alarm(id);
        Ok(())
    }

    pub async fn skip(&self, id: &str) -> Result<(), String> {
        self.data.skip(id).await?;
        self.settle_outside_alarm(id);
        Ok(())
    }

    fn settle_outside_alarm(&self, id: &str) {
        let was_due = self
            .scheduler
            .try_update_value(|s| s.acknowledge(id))
            .unwrap_or(false);
        if !was_due {
            return;
        }
        let alarm_for_id = self
            .alarm
            .with_untracked(|a| a.as_ref().is_some_and(|s| s.medication_id() == id && !s.is_busy()));
        if alarm_for_id {
            self.alarm.set(None);
        }
        self.check();
    }
}
