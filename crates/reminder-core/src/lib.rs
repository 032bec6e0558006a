//! MediReminder Core
//!
//! Types and rules shared by the browser client and the REST server:
//! - model: medications, history entries, user settings
//! - schedule: time-of-day math (next reminder, due slots)
//! - scheduler: per-medication reminder state machine
//! - alarm: state of the alarm dialog
//! - api: action request/response bodies
//!
//! Nothing here performs I/O. Every function that depends on the clock
//! takes the current time as a parameter.

mod error;
mod time_of_day;
mod medication;
mod history;
mod settings;
mod snooze;
pub mod schedule;
mod scheduler;
mod alarm;
pub mod api;

pub use error::{CoreError, CoreResult};
pub use time_of_day::TimeOfDay;
pub use medication::{
    Medication, MedicationId, MedicationPatch, MedicationSettings, NewMedication,
    LOW_REFILL_THRESHOLD,
};
pub use history::{HistoryEntry, HistoryStatus, MedicationAction};
pub use settings::{sound_path, AlarmSound, Profile, Settings, Theme, ALARM_SOUNDS, DEFAULT_SOUND};
pub use snooze::{prune_snoozes, SnoozeRecord};
pub use scheduler::{DueCause, DueReminder, ReminderScheduler, ReminderState};
pub use alarm::{format_elapsed, AlarmChoice, AlarmOutcome, AlarmPhase, AlarmSession, SNOOZE_CHOICES};
