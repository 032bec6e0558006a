//! REST Command Wrappers
//!
//! Frontend bindings to the medication service. Components never talk to
//! the backend directly; they go through `DataContext`, which holds a
//! `MedicationBackend`.

mod http;

use async_trait::async_trait;
use reminder_core::api::{ActionRequest, ActionResponse};
use reminder_core::{HistoryEntry, Medication, MedicationAction, MedicationPatch, NewMedication};

pub use http::HttpBackend;

/// Base URL of the REST API, overridable at build time with `MEDI_API_URL`
pub const API_URL: &str = match option_env!("MEDI_API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// Remote medication storage
#[async_trait(?Send)]
pub trait MedicationBackend {
    async fn list_medications(&self) -> Result<Vec<Medication>, String>;

    async fn create_medication(&self, new: &NewMedication) -> Result<Medication, String>;

    async fn update_medication(&self, id: &str, patch: &MedicationPatch) -> Result<Medication, String>;

    async fn delete_medication(&self, id: &str) -> Result<(), String>;

    /// Record taken/snoozed/skipped; the server appends the history entry
    async fn record_action(
        &self,
        id: &str,
        action: MedicationAction,
        request: &ActionRequest,
    ) -> Result<ActionResponse, String>;

    async fn list_history(&self) -> Result<Vec<HistoryEntry>, String>;

    async fn clear_history(&self) -> Result<(), String>;
}

/// Path segment of an action endpoint
pub fn action_path(action: MedicationAction) -> &'static str {
    match action {
        MedicationAction::Taken => "taken",
        MedicationAction::Snoozed { .. } => "snooze",
        MedicationAction::Skipped => "skip",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_paths() {
        assert_eq!(action_path(MedicationAction::Taken), "taken");
        assert_eq!(action_path(MedicationAction::Snoozed { minutes: 5 }), "snooze");
        assert_eq!(action_path(MedicationAction::Skipped), "skip");
    }
}
