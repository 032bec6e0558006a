//! Domain Layer
//!
//! Entity contract, domain errors and server-side business rules. The
//! records themselves come from `reminder_core`.

mod entity;
mod dose_rule;

pub use entity::{Entity, DomainError, DomainResult};
pub use dose_rule::DoseRule;
pub use reminder_core::{
    HistoryEntry, Medication, MedicationAction, MedicationPatch, NewMedication,
};
