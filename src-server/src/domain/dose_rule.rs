//! Dose Window Rule
//!
//! Optional check on "taken" actions: a dose may only be recorded near one
//! of the configured times, and only once per slot.

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use reminder_core::schedule::nearest_slot_within;
use reminder_core::{HistoryStatus, Medication, MedicationAction};

use super::entity::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoseRule {
    window: Duration,
}

impl DoseRule {
    pub fn new(window_minutes: u32) -> Self {
        Self {
            window: Duration::minutes(i64::from(window_minutes)),
        }
    }

    /// Reject `action` at `at` if it breaks the rule. Only "taken" is checked.
    pub fn check(&self, medication: &Medication, action: MedicationAction, at: DateTime<Utc>) -> DomainResult<()> {
        if action != MedicationAction::Taken {
            return Ok(());
        }

        let now = local(at);
        let slot = nearest_slot_within(&medication.times, now, self.window).ok_or_else(|| {
            DomainError::Conflict("no active reminder within tolerance window".to_string())
        })?;

        let already_taken = medication
            .history
            .iter()
            .filter(|entry| entry.status == HistoryStatus::Taken)
            .any(|entry| (local(entry.taken_at) - slot).abs() <= self.window);

        if already_taken {
            return Err(DomainError::Conflict("already taken for this time slot".to_string()));
        }
        Ok(())
    }
}

fn local(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}
