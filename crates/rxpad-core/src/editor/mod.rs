//! Draft editing: patient fields, note, and the medicines sub-list.

mod draft;
mod medicines;

pub use medicines::*;

use thiserror::Error;

/// Medicine list editing errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    #[error("No medicine with id {0}")]
    MedicineNotFound(u32),
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Reasons a draft cannot be submitted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DraftError {
    #[error("Prescription date is not a valid calendar date: {0:?}")]
    InvalidDate(String),
}
