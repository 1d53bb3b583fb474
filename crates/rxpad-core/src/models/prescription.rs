//! Prescription drafts and persisted prescriptions.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::clinician::ClinicianProfile;
use super::medicine::MedicineEntry;
use super::patient::PatientData;

/// Transient editing state for a prescription.
///
/// Serializes to the `{patientData, medicines, note}` body the backend accepts for
/// create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionDraft {
    /// Patient section
    pub patient_data: PatientData,
    /// Medicine rows, in display order
    pub medicines: Vec<MedicineEntry>,
    /// Optional free-text note (empty means none)
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    /// Id of the saved prescription this draft was loaded from, if any
    #[serde(skip)]
    pub loaded_from: Option<String>,
}

impl PrescriptionDraft {
    /// Fresh form: blank patient dated `today` and one empty medicine row.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            patient_data: PatientData::new(today),
            medicines: vec![MedicineEntry::blank(1)],
            note: String::new(),
            loaded_from: None,
        }
    }

    /// Start a new draft from a saved prescription.
    pub fn from_prescription(prescription: &Prescription) -> Self {
        Self {
            patient_data: prescription.patient_data.clone(),
            medicines: prescription.medicines.clone(),
            note: prescription.note.clone(),
            loaded_from: Some(prescription.id.clone()),
        }
    }

    /// The note, if it has any visible content.
    pub fn note(&self) -> Option<&str> {
        (!self.note.trim().is_empty()).then_some(self.note.as_str())
    }
}

impl Default for PrescriptionDraft {
    fn default() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

/// Summary of the authoring doctor embedded in a prescription.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DoctorSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(flatten)]
    pub profile: ClinicianProfile,
}

/// The `doctorId` field: either a bare id or a populated summary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DoctorRef {
    Id(String),
    Populated(DoctorSummary),
}

impl DoctorRef {
    pub fn id(&self) -> &str {
        match self {
            DoctorRef::Id(id) => id,
            DoctorRef::Populated(summary) => &summary.id,
        }
    }

    /// Denormalized profile fields, when the backend attached them.
    pub fn profile(&self) -> Option<&ClinicianProfile> {
        match self {
            DoctorRef::Id(_) => None,
            DoctorRef::Populated(summary) => Some(&summary.profile),
        }
    }
}

/// A persisted prescription. Identity is assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(rename = "doctorId", default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<DoctorRef>,
    pub patient_data: PatientData,
    #[serde(default)]
    pub medicines: Vec<MedicineEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Prescription {
    /// Freeze a draft into a record with the given identity.
    pub fn from_draft(id: String, doctor: Option<DoctorRef>, draft: &PrescriptionDraft) -> Self {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);
        Self {
            id,
            doctor,
            patient_data: draft.patient_data.clone(),
            medicines: draft.medicines.clone(),
            note: draft.note.clone(),
            created_at: Some(now.clone()),
            updated_at: Some(now),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
