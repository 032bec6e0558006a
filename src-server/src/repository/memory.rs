//! In-memory Medication Repository
//!
//! Everything lives behind a single async mutex so an action updates the
//! medication and the global log together. Contents are lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult, HistoryEntry, Medication, MedicationPatch};
use super::traits::{ActionRecord, MedicationRepository, Repository};

#[derive(Debug, Default)]
struct Store {
    medications: Vec<Medication>,
    history: Vec<HistoryEntry>,
}

impl Store {
    fn get_mut(&mut self, id: &str) -> DomainResult<&mut Medication> {
        self.medications
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::medication_not_found(id))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryMedicationRepository {
    store: Arc<Mutex<Store>>,
}

impl InMemoryMedicationRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Repository<Medication> for InMemoryMedicationRepository {
    async fn create(&self, medication: &Medication) -> DomainResult<Medication> {
        let mut store = self.store.lock().await;
        if store.medications.iter().any(|m| m.id == medication.id) {
            return Err(DomainError::Conflict(format!("medication {} already exists", medication.id)));
        }
        store.medications.push(medication.clone());
        Ok(medication.clone())
    }

    async fn find_by_id(&self, id: &String) -> DomainResult<Option<Medication>> {
        let store = self.store.lock().await;
        Ok(store.medications.iter().find(|m| &m.id == id).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Medication>> {
        let store = self.store.lock().await;
        Ok(store.medications.clone())
    }

    async fn delete(&self, id: &String) -> DomainResult<()> {
        let mut store = self.store.lock().await;
        let before = store.medications.len();
        store.medications.retain(|m| &m.id != id);
        if store.medications.len() == before {
            return Err(DomainError::medication_not_found(id));
        }
        Ok(())
    }
}

#[async_trait]
impl MedicationRepository for InMemoryMedicationRepository {
    async fn patch(&self, id: &str, patch: MedicationPatch) -> DomainResult<Medication> {
        let mut store = self.store.lock().await;
        let medication = store.get_mut(id)?;
        medication.apply_patch(patch)?;
        Ok(medication.clone())
    }

    async fn record(&self, id: &str, record: ActionRecord) -> DomainResult<(Medication, HistoryEntry)> {
        let mut store = self.store.lock().await;
        let medication = store.get_mut(id)?;

        if let Some(rule) = record.dose_rule {
            rule.check(medication, record.action, record.at)?;
        }

        let entry = HistoryEntry::new(record.entry_id, medication, record.action, record.at);
        let entry = medication.record(entry);
        let updated = medication.clone();
        store.history.push(entry.clone());
        Ok((updated, entry))
    }

    async fn list_history(&self) -> DomainResult<Vec<HistoryEntry>> {
        let store = self.store.lock().await;
        Ok(store.history.clone())
    }

    async fn clear_history(&self) -> DomainResult<()> {
        let mut store = self.store.lock().await;
        store.history.clear();
        for medication in store.medications.iter_mut() {
            medication.history.clear();
        }
        Ok(())
    }
}
