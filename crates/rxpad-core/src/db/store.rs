//! [`PrescriptionStore`] backed by the local database.

use tracing::{debug, info};
use uuid::Uuid;

use super::{Database, DbError, DbResult};
use crate::listing::PrescriptionFilter;
use crate::models::{DoctorRef, Prescription, PrescriptionDraft};
use crate::store::PrescriptionStore;

/// Offline prescription store with the same filter semantics as the backend.
pub struct LocalStore {
    db: Database,
    doctor_id: Option<String>,
}

impl LocalStore {
    pub fn new(db: Database) -> Self {
        Self { db, doctor_id: None }
    }

    /// Stamp created records with this doctor id.
    pub fn with_doctor(mut self, doctor_id: impl Into<String>) -> Self {
        self.doctor_id = Some(doctor_id.into());
        self
    }

    pub fn in_memory() -> DbResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn checked(draft: &PrescriptionDraft) -> DbResult<()> {
        draft
            .validate()
            .map_err(|e| DbError::Validation(e.to_string()))
    }
}

impl PrescriptionStore for LocalStore {
    type Error = DbError;

    fn list(&self, filter: &PrescriptionFilter) -> DbResult<Vec<Prescription>> {
        let prescriptions = self.db.list_prescriptions(filter)?;
        debug!(count = prescriptions.len(), "listed local prescriptions");
        Ok(prescriptions)
    }

    fn get(&self, id: &str) -> DbResult<Prescription> {
        self.db
            .get_prescription(id)?
            .ok_or_else(|| DbError::NotFound(id.to_string()))
    }

    fn create(&self, draft: &PrescriptionDraft) -> DbResult<Prescription> {
        Self::checked(draft)?;
        let id = Uuid::new_v4().to_string();
        let doctor = self.doctor_id.clone().map(DoctorRef::Id);
        let prescription = Prescription::from_draft(id, doctor, draft);
        self.db.insert_prescription(&prescription)?;
        info!(id = %prescription.id, "prescription created locally");
        Ok(prescription)
    }

    fn update(&self, id: &str, draft: &PrescriptionDraft) -> DbResult<Prescription> {
        Self::checked(draft)?;
        let existing = self.get(id)?;
        let replacement = Prescription {
            patient_data: draft.patient_data.clone(),
            medicines: draft.medicines.clone(),
            note: draft.note.clone(),
            ..existing
        };
        if !self.db.replace_prescription(&replacement)? {
            return Err(DbError::NotFound(id.to_string()));
        }
        info!(id, "prescription updated locally");
        self.get(id)
    }

    fn delete(&self, id: &str) -> DbResult<()> {
        if !self.db.delete_prescription(id)? {
            return Err(DbError::NotFound(id.to_string()));
        }
        info!(id, "prescription deleted locally");
        Ok(())
    }
}
