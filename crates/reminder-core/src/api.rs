//! REST Payloads
//!
//! Bodies of the taken/snooze/skip action endpoints, shared by the client
//! and the server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;
use crate::medication::Medication;

/// Snooze length used when a request names none
pub const DEFAULT_SNOOZE_MINUTES: u32 = 5;

/// A history entry prepared by the client.
///
/// Only its id, timestamp and snooze duration are kept; the server fills in
/// the medication and status itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taken_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_duration: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_entry: Option<EntryDraft>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snooze_duration: Option<u32>,
}

impl ActionRequest {
    pub fn snooze(minutes: u32) -> Self {
        Self {
            history_entry: None,
            snooze_duration: Some(minutes),
        }
    }

    /// Requested snooze length: top-level field, then the draft's, then the default
    pub fn snooze_minutes(&self) -> u32 {
        self.snooze_duration
            .or_else(|| self.history_entry.as_ref().and_then(|e| e.snooze_duration))
            .unwrap_or(DEFAULT_SNOOZE_MINUTES)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub medication: Medication,
    pub history_entry: HistoryEntry,
}
