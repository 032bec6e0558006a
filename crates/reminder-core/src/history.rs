//! History Entry
//!
//! An append-only record of one taken/skipped/snoozed action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::medication::{Medication, MedicationId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    Taken,
    Skipped,
    Snoozed,
}

impl HistoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::Taken => "taken",
            HistoryStatus::Skipped => "skipped",
            HistoryStatus::Snoozed => "snoozed",
        }
    }
}

/// What the user did about a reminder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationAction {
    Taken,
    Skipped,
    Snoozed { minutes: u32 },
}

impl MedicationAction {
    pub fn status(&self) -> HistoryStatus {
        match self {
            MedicationAction::Taken => HistoryStatus::Taken,
            MedicationAction::Skipped => HistoryStatus::Skipped,
            MedicationAction::Snoozed { .. } => HistoryStatus::Snoozed,
        }
    }

    pub fn snooze_minutes(&self) -> Option<u32> {
        match self {
            MedicationAction::Snoozed { minutes } => Some(*minutes),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub medication_id: MedicationId,
    /// Copied from the medication at the time of the action
    pub medication_name: String,
    pub taken_at: DateTime<Utc>,
    pub status: HistoryStatus,
    /// Only present for snoozed entries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_duration: Option<u32>,
}

impl HistoryEntry {
    pub fn new(id: String, medication: &Medication, action: MedicationAction, at: DateTime<Utc>) -> Self {
        Self {
            id,
            medication_id: medication.id.clone(),
            medication_name: medication.name.clone(),
            taken_at: at,
            status: action.status(),
            snooze_duration: action.snooze_minutes(),
        }
    }

    /// Rebuild the action this entry records.
    ///
    /// A snoozed entry missing its duration reads as a zero-minute snooze.
    pub fn action(&self) -> MedicationAction {
        match self.status {
            HistoryStatus::Taken => MedicationAction::Taken,
            HistoryStatus::Skipped => MedicationAction::Skipped,
            HistoryStatus::Snoozed => MedicationAction::Snoozed {
                minutes: self.snooze_duration.unwrap_or(0),
            },
        }
    }

    /// Short human-readable description, e.g. "snoozed 15m"
    pub fn describe(&self) -> String {
        match self.action() {
            MedicationAction::Snoozed { minutes } => format!("snoozed {}m", minutes),
            other => other.status().as_str().to_string(),
        }
    }
}
