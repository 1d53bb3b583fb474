//! Domain models for rxpad.

mod clinician;
mod medicine;
mod pagination;
mod patient;
mod prescription;

pub use clinician::*;
pub use medicine::*;
pub use pagination::*;
pub use patient::*;
pub use prescription::*;
