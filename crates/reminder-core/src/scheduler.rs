//! Reminder Scheduler
//!
//! Tracks every medication through `idle -> due -> (snoozed -> due) |
//! (acknowledged -> idle)` and decides which alarm is shown.
//!
//! Only one alarm is active at a time. Medications that become due while
//! another alarm is open wait in FIFO order until it is acknowledged or
//! snoozed; a long-open alarm can starve the queue.
//!
//! The scheduler never reads the clock. The caller asks [`next_wake`] when
//! to come back, sleeps until then, and calls [`tick`].
//!
//! [`next_wake`]: ReminderScheduler::next_wake
//! [`tick`]: ReminderScheduler::tick

use std::collections::{HashMap, VecDeque};

use chrono::{Duration, NaiveDateTime};

use crate::medication::{Medication, MedicationId};
use crate::schedule::{self, DUE_TOLERANCE_MINUTES};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderState {
    #[default]
    Idle,
    /// Alarming or waiting for the active alarm to close
    Due,
    Snoozed { until: NaiveDateTime },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueCause {
    Schedule,
    SnoozeExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueReminder {
    pub medication_id: MedicationId,
    /// Configured slot or snooze end that triggered the reminder
    pub due_at: NaiveDateTime,
    pub cause: DueCause,
}

#[derive(Debug, Clone)]
pub struct ReminderScheduler {
    tolerance: Duration,
    states: HashMap<MedicationId, ReminderState>,
    /// Last slot that fired per medication; a slot fires once
    last_fired: HashMap<MedicationId, NaiveDateTime>,
    queue: VecDeque<DueReminder>,
    active: Option<DueReminder>,
    /// Persisted snoozes waiting for their medication to be listed
    restored: HashMap<MedicationId, NaiveDateTime>,
}

impl Default for ReminderScheduler {
    fn default() -> Self {
        Self::with_tolerance(Duration::minutes(DUE_TOLERANCE_MINUTES))
    }
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tolerance(tolerance: Duration) -> Self {
        Self {
            tolerance,
            states: HashMap::new(),
            last_fired: HashMap::new(),
            queue: VecDeque::new(),
            active: None,
            restored: HashMap::new(),
        }
    }

    pub fn state(&self, id: &str) -> ReminderState {
        self.states.get(id).copied().unwrap_or_default()
    }

    pub fn active(&self) -> Option<&DueReminder> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|r| r.medication_id == id)
    }

    /// Due reminders waiting behind the active one
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Re-apply a snooze persisted by an earlier session.
    ///
    /// The snooze is held until a tick lists its medication, so ticking
    /// before the medications are loaded does not drop it.
    pub fn restore_snooze(&mut self, id: MedicationId, until: NaiveDateTime) {
        if self.state(&id) == ReminderState::Idle {
            self.restored.insert(id, until);
        }
    }

    /// Currently snoozed medications and their wake times
    pub fn snoozes(&self) -> Vec<(MedicationId, NaiveDateTime)> {
        self.states
            .iter()
            .filter_map(|(id, state)| match state {
                ReminderState::Snoozed { until } => Some((id.clone(), *until)),
                _ => None,
            })
            .chain(self.restored.iter().map(|(id, until)| (id.clone(), *until)))
            .collect()
    }

    /// Evaluate every medication at `now`.
    ///
    /// Returns the reminder that became active on this tick, if any.
    pub fn tick(&mut self, medications: &[Medication], now: NaiveDateTime) -> Option<DueReminder> {
        self.forget_missing(medications);
        self.adopt_restored(medications);

        for med in medications {
            match self.state(&med.id) {
                ReminderState::Due => {}
                ReminderState::Snoozed { until } => {
                    if now >= until {
                        self.mark_due(&med.id, until, DueCause::SnoozeExpired);
                    }
                }
                ReminderState::Idle => {
                    if let Some(slot) = self.unfired_slot(med, now) {
                        self.last_fired.insert(med.id.clone(), slot);
                        self.mark_due(&med.id, slot, DueCause::Schedule);
                    }
                }
            }
        }

        if self.active.is_some() {
            return None;
        }
        self.active = self.queue.pop_front();
        self.active.clone()
    }

    /// The user took (or dismissed) the dose; the medication goes back to idle.
    ///
    /// Returns false when the medication was not due.
    pub fn acknowledge(&mut self, id: &str) -> bool {
        if self.state(id) != ReminderState::Due {
            return false;
        }
        self.clear_due(id);
        self.states.insert(id.to_string(), ReminderState::Idle);
        true
    }

    /// Defer the medication for `minutes`; time-of-day matches are
    /// suppressed until the snooze ends. Returns the wake time.
    pub fn snooze(&mut self, id: &str, minutes: u32, now: NaiveDateTime) -> NaiveDateTime {
        let until = now + Duration::minutes(i64::from(minutes));
        self.clear_due(id);
        self.states.insert(id.to_string(), ReminderState::Snoozed { until });
        until
    }

    /// Soonest instant at which any medication can become due.
    ///
    /// `None` when nothing is scheduled (no medications, or all are due).
    pub fn next_wake(&self, medications: &[Medication], now: NaiveDateTime) -> Option<NaiveDateTime> {
        medications
            .iter()
            .filter_map(|med| match self.state(&med.id) {
                ReminderState::Due => None,
                ReminderState::Snoozed { until } => Some(until.max(now)),
                ReminderState::Idle => match self.unfired_slot(med, now) {
                    Some(_) => Some(now),
                    None => med.next_reminder(now),
                },
            })
            .min()
    }

    fn unfired_slot(&self, med: &Medication, now: NaiveDateTime) -> Option<NaiveDateTime> {
        schedule::due_slot(&med.times, now, self.tolerance)
            .filter(|slot| self.last_fired.get(&med.id) != Some(slot))
    }

    fn mark_due(&mut self, id: &str, due_at: NaiveDateTime, cause: DueCause) {
        self.states.insert(id.to_string(), ReminderState::Due);
        self.queue.push_back(DueReminder {
            medication_id: id.to_string(),
            due_at,
            cause,
        });
    }

    fn clear_due(&mut self, id: &str) {
        if self.active.as_ref().is_some_and(|r| r.medication_id == id) {
            self.active = None;
        }
        self.queue.retain(|r| r.medication_id != id);
    }

    fn adopt_restored(&mut self, medications: &[Medication]) {
        for med in medications {
            if let Some(until) = self.restored.remove(&med.id) {
                if self.state(&med.id) == ReminderState::Idle {
                    self.states.insert(med.id.clone(), ReminderState::Snoozed { until });
                }
            }
        }
    }

    fn forget_missing(&mut self, medications: &[Medication]) {
        let known = |id: &str| medications.iter().any(|m| m.id == id);
        self.states.retain(|id, _| known(id.as_str()));
        self.last_fired.retain(|id, _| known(id.as_str()));
        self.queue.retain(|r| known(r.medication_id.as_str()));
        if self.active.as_ref().is_some_and(|r| !known(r.medication_id.as_str())) {
            self.active = None;
        }
    }
}
