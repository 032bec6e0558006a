//! Data Context
//!
//! Holds the backend and the reactive store. Passed as a prop to every
//! component that reads or mutates data.

use std::rc::Rc;

use chrono::Utc;
use leptos::prelude::*;
use reminder_core::api::{ActionRequest, ActionResponse, EntryDraft};
use reminder_core::{Medication, MedicationAction, MedicationPatch, NewMedication, Settings};

use crate::commands::MedicationBackend;
use crate::storage;
use crate::store::{
    store_remove_medication, store_update_medication, AppStore, AppStateStoreFields,
};

#[derive(Clone, Copy)]
pub struct DataContext {
    pub store: AppStore,
    backend: StoredValue<Rc<dyn MedicationBackend>, LocalStorage>,
}

impl DataContext {
    pub fn new(store: AppStore, backend: Rc<dyn MedicationBackend>) -> Self {
        Self {
            store,
            backend: StoredValue::new_local(backend),
        }
    }

    fn backend(&self) -> Rc<dyn MedicationBackend> {
        self.backend.get_value()
    }

    /// Fetch medications and history from the server
    pub async fn load(&self) -> Result<(), String> {
        let backend = self.backend();

        let medications = backend.list_medications().await.map_err(|e| log_error("load medications", e))?;
        web_sys::console::log_1(&format!("[DATA] Loaded {} medications", medications.len()).into());
        self.store.loaded().set(true);
        self.store.medications().set(medications);

        let history = backend.list_history().await.map_err(|e| log_error("load history", e))?;
        self.store.history().set(history);

        self.store.load_error().set(None);
        Ok(())
    }

    pub async fn add_medication(&self, new: NewMedication) -> Result<Medication, String> {
        let created = self
            .backend()
            .create_medication(&new)
            .await
            .map_err(|e| log_error("add medication", e))?;
        self.store.medications().write().push(created.clone());
        Ok(created)
    }

    pub async fn update_medication(&self, id: &str, patch: MedicationPatch) -> Result<Medication, String> {
        let updated = self
            .backend()
            .update_medication(id, &patch)
            .await
            .map_err(|e| log_error("update medication", e))?;
        store_update_medication(&self.store, updated.clone());
        Ok(updated)
    }

    pub async fn delete_medication(&self, id: &str) -> Result<(), String> {
        self.backend()
            .delete_medication(id)
            .await
            .map_err(|e| log_error("delete medication", e))?;
        store_remove_medication(&self.store, id);
        storage::save_snoozes(&self.store.snoozes().get_untracked());
        Ok(())
    }

    pub async fn mark_taken(&self, id: &str) -> Result<ActionResponse, String> {
        self.record(id, MedicationAction::Taken, ActionRequest::default()).await
    }

    pub async fn snooze(&self, id: &str, minutes: u32) -> Result<ActionResponse, String> {
        self.record(id, MedicationAction::Snoozed { minutes }, ActionRequest::snooze(minutes))
            .await
    }

    pub async fn skip(&self, id: &str) -> Result<ActionResponse, String> {
        self.record(id, MedicationAction::Skipped, ActionRequest::default()).await
    }

    async fn record(
        &self,
        id: &str,
        action: MedicationAction,
        mut request: ActionRequest,
    ) -> Result<ActionResponse, String> {
        request.history_entry = Some(EntryDraft {
            taken_at: Some(Utc::now()),
            snooze_duration: action.snooze_minutes(),
            ..Default::default()
        });

        let response = self
            .backend()
            .record_action(id, action, &request)
            .await
            .map_err(|e| log_error(action_label(action), e))?;

        store_update_medication(&self.store, response.medication.clone());
        self.store.history().write().push(response.history_entry.clone());
        Ok(response)
    }

    pub async fn clear_history(&self) -> Result<(), String> {
        self.backend()
            .clear_history()
            .await
            .map_err(|e| log_error("clear history", e))?;
        self.store.history().write().clear();
        for med in self.store.medications().write().iter_mut() {
            med.history.clear();
        }
        Ok(())
    }

    /// Apply and persist new settings
    pub fn update_settings(&self, settings: Settings) {
        storage::save_settings(&settings);
        self.store.settings().set(settings);
    }
}

fn action_label(action: MedicationAction) -> &'static str {
    match action {
        MedicationAction::Taken => "mark medication taken",
        MedicationAction::Snoozed { .. } => "snooze medication",
        MedicationAction::Skipped => "skip medication",
    }
}

fn log_error(what: &str, error: String) -> String {
    web_sys::console::error_1(&format!("[DATA] Failed to {}: {}", what, error).into());
    error
}
