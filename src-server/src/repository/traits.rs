//! Repository Layer - Core Traits
//!
//! Defines the abstract interfaces for data access.
//! The service ships an in-memory implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{
    DomainResult, DoseRule, Entity, HistoryEntry, Medication, MedicationAction, MedicationPatch,
};

/// Core repository trait for CRUD operations
///
/// Generic over any Entity type.
/// All operations are async to support various backends.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Store a new entity
    async fn create(&self, entity: &T) -> DomainResult<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// List all entities
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Delete entity by ID
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}

/// One action to record against a medication
#[derive(Debug, Clone)]
pub struct ActionRecord {
    pub action: MedicationAction,
    pub entry_id: String,
    pub at: DateTime<Utc>,
    pub dose_rule: Option<DoseRule>,
}

/// Medication storage plus the global history log
#[async_trait]
pub trait MedicationRepository: Repository<Medication> {
    /// Apply a partial update and return the stored result
    async fn patch(&self, id: &str, patch: MedicationPatch) -> DomainResult<Medication>;

    /// Append an action to the medication's history and to the global log.
    ///
    /// Both writes happen under one lock; a rejected action leaves both
    /// untouched.
    async fn record(&self, id: &str, record: ActionRecord) -> DomainResult<(Medication, HistoryEntry)>;

    /// Global log in insertion order
    async fn list_history(&self) -> DomainResult<Vec<HistoryEntry>>;

    /// Empty the global log and every medication's history
    async fn clear_history(&self) -> DomainResult<()>;
}
