//! The persistence contract for prescriptions.

use crate::listing::PrescriptionFilter;
use crate::models::{Prescription, PrescriptionDraft};
use crate::notice::UserFacing;

/// Create/list/update/delete access to persisted prescriptions.
///
/// Every call maps to exactly one backend request. Implementations never retry; callers
/// decide what to tell the user.
pub trait PrescriptionStore {
    type Error: std::error::Error + UserFacing;

    /// All prescriptions matching `filter`; empty fields are unconstrained.
    fn list(&self, filter: &PrescriptionFilter) -> Result<Vec<Prescription>, Self::Error>;

    fn get(&self, id: &str) -> Result<Prescription, Self::Error>;

    /// Persist a new record; the store assigns id and doctor.
    fn create(&self, draft: &PrescriptionDraft) -> Result<Prescription, Self::Error>;

    /// Replace the whole record `id`.
    fn update(&self, id: &str, draft: &PrescriptionDraft) -> Result<Prescription, Self::Error>;

    fn delete(&self, id: &str) -> Result<(), Self::Error>;
}
