//! Medication Entity
//!
//! A trackable item with a daily dosing schedule and its adherence history.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::history::{HistoryEntry, MedicationAction};
use crate::schedule;
use crate::time_of_day::TimeOfDay;

pub type MedicationId = String;

/// Refill counts at or below this are highlighted in the UI
pub const LOW_REFILL_THRESHOLD: u32 = 5;

/// Per-medication alarm preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationSettings {
    /// Overrides the global alarm sound when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alarm_sound: Option<String>,
    #[serde(default = "default_true")]
    pub notification_enabled: bool,
}

impl Default for MedicationSettings {
    fn default() -> Self {
        Self {
            alarm_sound: None,
            notification_enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_frequency() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: MedicationId,
    pub name: String,
    pub dosage: String,
    /// Doses per day, as entered by the user
    pub frequency: u32,
    pub times: Vec<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refills: Option<u32>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: MedicationSettings,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    #[serde(default = "default_frequency")]
    pub frequency: u32,
    pub times: Vec<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refills: Option<u32>,
    #[serde(default)]
    pub settings: MedicationSettings,
}

/// Body of an update request; absent fields are left untouched.
///
/// `refills` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears the count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<Vec<TimeOfDay>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub refills: Option<Option<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MedicationSettings>,
}

fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Medication {
    /// Build a medication from a create request
    pub fn create(id: MedicationId, new: NewMedication, created_at: DateTime<Utc>) -> CoreResult<Self> {
        if new.times.is_empty() {
            return Err(CoreError::EmptySchedule);
        }
        Ok(Self {
            id,
            name: new.name,
            dosage: new.dosage,
            frequency: new.frequency,
            times: new.times,
            refills: new.refills,
            created_at,
            settings: new.settings,
            history: Vec::new(),
        })
    }

    /// Merge an update request into this record
    pub fn apply_patch(&mut self, patch: MedicationPatch) -> CoreResult<()> {
        if matches!(&patch.times, Some(times) if times.is_empty()) {
            return Err(CoreError::EmptySchedule);
        }

        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(dosage) = patch.dosage {
            self.dosage = dosage;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(times) = patch.times {
            self.times = times;
        }
        if let Some(refills) = patch.refills {
            self.refills = refills;
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
        Ok(())
    }

    /// Append `entry` and apply its side effects.
    ///
    /// Taking a dose uses up one refill when refills are tracked.
    pub fn record(&mut self, entry: HistoryEntry) -> HistoryEntry {
        if entry.action() == MedicationAction::Taken {
            if let Some(refills) = self.refills.as_mut() {
                *refills = refills.saturating_sub(1);
            }
        }
        self.history.push(entry.clone());
        entry
    }

    /// Next configured reminder strictly after `now` (local wall clock)
    pub fn next_reminder(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        schedule::next_reminder(&self.times, now)
    }

    pub fn refills_low(&self) -> bool {
        self.refills.is_some_and(|r| r <= LOW_REFILL_THRESHOLD)
    }

    /// The sound to ring for this medication, falling back to the global choice
    pub fn alarm_sound<'a>(&'a self, global: &'a str) -> &'a str {
        self.settings.alarm_sound.as_deref().filter(|s| !s.is_empty()).unwrap_or(global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn times(raw: &[&str]) -> Vec<TimeOfDay> {
        raw.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn sample(refills: Option<u32>) -> Medication {
        let new = NewMedication {
            name: "Aspirin".to_string(),
            dosage: "100mg".to_string(),
            frequency: 2,
            times: times(&["08:00", "20:00"]),
            refills,
            settings: MedicationSettings::default(),
        };
        Medication::create("med-1".to_string(), new, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).unwrap()
    }

    fn taken_entry(med: &Medication) -> HistoryEntry {
        HistoryEntry::new("h-1".to_string(), med, MedicationAction::Taken, Utc::now())
    }

    #[test]
    fn test_create_requires_times() {
        let new = NewMedication {
            name: "Empty".to_string(),
            dosage: "1".to_string(),
            frequency: 1,
            times: Vec::new(),
            refills: None,
            settings: MedicationSettings::default(),
        };
        let result = Medication::create("x".to_string(), new, Utc::now());
        assert_eq!(result.unwrap_err(), CoreError::EmptySchedule);
    }

    #[test]
    fn test_taken_decrements_refills_floored_at_zero() {
        let mut med = sample(Some(1));
        let entry = taken_entry(&med);
        med.record(entry.clone());
        assert_eq!(med.refills, Some(0));
        med.record(entry);
        assert_eq!(med.refills, Some(0));
        assert_eq!(med.history.len(), 2);
    }

    #[test]
    fn test_taken_without_refills_leaves_none() {
        let mut med = sample(None);
        let entry = taken_entry(&med);
        med.record(entry);
        assert_eq!(med.refills, None);
        assert_eq!(med.history.len(), 1);
    }

    #[test]
    fn test_skip_and_snooze_keep_refills() {
        let mut med = sample(Some(3));
        let skip = HistoryEntry::new("h-1".to_string(), &med, MedicationAction::Skipped, Utc::now());
        let snooze = HistoryEntry::new("h-2".to_string(), &med, MedicationAction::Snoozed { minutes: 5 }, Utc::now());
        med.record(skip);
        med.record(snooze);
        assert_eq!(med.refills, Some(3));
    }

    #[test]
    fn test_patch_merges_and_clears_refills() {
        let mut med = sample(Some(10));
        let patch: MedicationPatch = serde_json::from_str(r#"{"name":"Ibuprofen","refills":null}"#).unwrap();
        med.apply_patch(patch).unwrap();
        assert_eq!(med.name, "Ibuprofen");
        assert_eq!(med.dosage, "100mg");
        assert_eq!(med.refills, None);

        let untouched: MedicationPatch = serde_json::from_str(r#"{"dosage":"200mg"}"#).unwrap();
        assert_eq!(untouched.refills, None);
    }

    #[test]
    fn test_patch_rejects_empty_times() {
        let mut med = sample(None);
        let patch = MedicationPatch {
            times: Some(Vec::new()),
            ..Default::default()
        };
        assert_eq!(med.apply_patch(patch), Err(CoreError::EmptySchedule));
        assert_eq!(med.times.len(), 2);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let med = sample(Some(4));
        let json = serde_json::to_value(&med).unwrap();
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(json["times"][1], "20:00");
        assert_eq!(json["settings"]["notificationEnabled"], true);
        assert!(med.refills_low());
    }

    #[test]
    fn test_alarm_sound_falls_back_to_global() {
        let mut med = sample(None);
        assert_eq!(med.alarm_sound("bell"), "bell");
        med.settings.alarm_sound = Some("chime".to_string());
        assert_eq!(med.alarm_sound("bell"), "chime");
    }
}
