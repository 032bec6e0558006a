//! Commands Layer
//!
//! axum handlers that bridge HTTP requests to the repository.

mod medication_cmd;
mod history_cmd;

#[cfg(test)]
mod tests;

pub use medication_cmd::*;
pub use history_cmd::*;
