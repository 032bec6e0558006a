//! Repository Layer
//!
//! Data access abstractions and implementations.

mod traits;
mod memory;

#[cfg(test)]
mod tests;

pub use traits::{ActionRecord, MedicationRepository, Repository};
pub use memory::InMemoryMedicationRepository;
