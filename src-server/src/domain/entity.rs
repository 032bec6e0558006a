//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all stored entities.

use reminder_core::{CoreError, Medication};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> &Self::Id;
}

impl Entity for Medication {
    type Id = String;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn medication_not_found(id: &str) -> Self {
        DomainError::NotFound(format!("medication {}", id))
    }
}

impl From<CoreError> for DomainError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTime(_) | CoreError::EmptySchedule => DomainError::InvalidInput(err.to_string()),
            CoreError::AlarmBusy | CoreError::AlarmClosed => DomainError::Conflict(err.to_string()),
        }
    }
}
