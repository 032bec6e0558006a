//! Snooze Records
//!
//! Client-side marker that a medication's alarm is deferred. Persisted so a
//! snooze survives a page reload.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::medication::MedicationId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnoozeRecord {
    pub id: MedicationId,
    /// Epoch milliseconds
    pub wake_timestamp: i64,
}

impl SnoozeRecord {
    /// Record a snooze ending at a local wall-clock time
    pub fn from_local(id: MedicationId, wake_at: NaiveDateTime) -> Self {
        let wake_timestamp = Local
            .from_local_datetime(&wake_at)
            .earliest()
            .map(|at| at.timestamp_millis())
            // skipped local time (DST gap): treat the wall clock as UTC
            .unwrap_or_else(|| wake_at.and_utc().timestamp_millis());
        Self { id, wake_timestamp }
    }

    pub fn wake_at(&self) -> Option<DateTime<Local>> {
        DateTime::from_timestamp_millis(self.wake_timestamp).map(|utc| utc.with_timezone(&Local))
    }

    /// Wake time on the local wall clock
    pub fn local_wake_at(&self) -> Option<NaiveDateTime> {
        self.wake_at().map(|at| at.naive_local())
    }

    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.wake_timestamp <= now_millis
    }
}

/// Drop records that have expired or whose medication no longer exists
pub fn prune_snoozes(records: &mut Vec<SnoozeRecord>, now_millis: i64, known: &[MedicationId]) {
    records.retain(|record| !record.is_expired(now_millis) && known.contains(&record.id));
}
