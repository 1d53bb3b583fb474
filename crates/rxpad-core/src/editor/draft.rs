//! Form-driven mutation of a prescription draft.

use chrono::NaiveDate;

use crate::models::{Gender, MedicineEntry, MedicineField, PatientField, PrescriptionDraft};

use super::{DraftError, EditorResult, MedicinesEditor};

impl PrescriptionDraft {
    /// Lend the medicine list to an editor, then take back the whole new sequence.
    pub fn edit_medicines<R>(&mut self, edit: impl FnOnce(&mut MedicinesEditor) -> R) -> R {
        let mut editor = MedicinesEditor::new(std::mem::take(&mut self.medicines));
        let result = edit(&mut editor);
        self.replace_medicines(editor.into_entries());
        result
    }

    /// Replace the medicine list wholesale.
    pub fn replace_medicines(&mut self, medicines: Vec<MedicineEntry>) {
        self.medicines = medicines;
    }

    pub fn add_medicine(&mut self) -> u32 {
        self.edit_medicines(|editor| editor.add())
    }

    pub fn remove_medicine(&mut self, id: u32) -> EditorResult<MedicineEntry> {
        self.edit_medicines(|editor| editor.remove(id))
    }

    pub fn update_medicine(
        &mut self,
        id: u32,
        field: MedicineField,
        value: impl Into<String>,
    ) -> EditorResult<()> {
        self.edit_medicines(|editor| editor.update(id, field, value))
    }

    pub fn set_patient_field(&mut self, field: PatientField, value: impl Into<String>) {
        self.patient_data.set(field, value);
    }

    pub fn set_gender(&mut self, gender: Gender) {
        self.patient_data.gender = gender;
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Reset to a fresh form dated `today`.
    pub fn clear(&mut self, today: NaiveDate) {
        *self = PrescriptionDraft::new(today);
    }

    /// Check the draft can be submitted.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.patient_data.parsed_date().is_none() {
            return Err(DraftError::InvalidDate(self.patient_data.date.clone()));
        }
        Ok(())
    }
}
