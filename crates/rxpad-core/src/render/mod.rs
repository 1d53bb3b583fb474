//! Prescription document rendering.
//!
//! [`render`] is a pure projection from draft data and a clinician profile to a
//! [`Document`]. The same document feeds the live preview, the print dialog and PDF
//! export; serializers in [`html`] and [`text`] never add data of their own.
//!
//! Rendering never fails on bad data: an unparseable date becomes
//! [`INVALID_DATE`], and missing profile fields fall back to [`RenderDefaults`].

pub mod html;
pub mod text;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{
    parse_calendar_date, ClinicianProfile, MedicineEntry, PatientData, Prescription,
    PrescriptionDraft,
};

/// Marker shown in place of a date that does not parse.
pub const INVALID_DATE: &str = "Invalid Date";

/// Errors from the raw-JSON entry point.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Malformed prescription input: {0}")]
    MalformedInput(#[from] serde_json::Error),
}

/// Fallback text for clinician fields the profile doesn't provide.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderDefaults {
    pub doctor_name: String,
    pub qualification: String,
    pub registration_no: String,
    pub clinic_name: String,
    pub address: String,
    pub mobile: String,
    pub logo: String,
    /// Line printed under the address
    pub tagline: Option<String>,
    /// Right-hand footer block
    pub footer_credit: Option<FooterCredit>,
}

impl Default for RenderDefaults {
    fn default() -> Self {
        Self {
            doctor_name: "Doctor".into(),
            qualification: "Medical Practitioner".into(),
            registration_no: "Not provided".into(),
            clinic_name: "Clinic".into(),
            address: "Address not provided".into(),
            mobile: "Not provided".into(),
            logo: "/logo.png".into(),
            tagline: Some("Online consultation as per the NMC guidelines.".into()),
            footer_credit: None,
        }
    }
}

/// Two-line credit printed at the bottom right of the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FooterCredit {
    pub title: String,
    pub subtitle: String,
}

/// A fully formed prescription document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Document {
    pub header: DocumentHeader,
    pub patient: PatientBlock,
    /// Printable medicine rows, in draft order
    pub medicines: Vec<DocumentMedicine>,
    pub note: Option<String>,
    pub footer: DocumentFooter,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentHeader {
    pub logo: String,
    pub clinic_name: String,
    pub doctor_name: String,
    /// Qualification, followed by " - specialty" when a specialty is known
    pub qualification_line: String,
    pub address: String,
    pub tagline: Option<String>,
    /// Display date, e.g. "5 Jan 2024"
    pub date: String,
    pub registration_no: String,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientBlock {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub diagnosis: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentMedicine {
    pub name: String,
    pub dose: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DocumentFooter {
    pub doctor_name: String,
    pub qualification: String,
    pub registration_no: String,
    pub credit: Option<FooterCredit>,
}

/// Render with the built-in [`RenderDefaults`].
pub fn render(
    patient: &PatientData,
    medicines: &[MedicineEntry],
    note: Option<&str>,
    profile: &ClinicianProfile,
) -> Document {
    render_with(patient, medicines, note, profile, &RenderDefaults::default())
}

/// Render a document, filling gaps in `profile` from `defaults`.
pub fn render_with(
    patient: &PatientData,
    medicines: &[MedicineEntry],
    note: Option<&str>,
    profile: &ClinicianProfile,
    defaults: &RenderDefaults,
) -> Document {
    let doctor_name = pick(&profile.name, &defaults.doctor_name);
    let qualification = pick(&profile.qualification, &defaults.qualification);
    let registration_no = pick(&profile.registration_no, &defaults.registration_no);

    let qualification_line = match profile.specialty.as_deref().map(str::trim) {
        Some(specialty) if !specialty.is_empty() => format!("{} - {}", qualification, specialty),
        _ => qualification.clone(),
    };

    let medicines = medicines
        .iter()
        .filter(|m| m.is_printable())
        .map(|m| DocumentMedicine {
            name: m.name.clone(),
            dose: m.dose.clone(),
        })
        .collect();

    let note = note
        .filter(|n| !n.trim().is_empty())
        .map(str::to_string);

    Document {
        header: DocumentHeader {
            logo: pick(&profile.logo_pic, &defaults.logo),
            clinic_name: pick(&profile.clinic_hospital_name, &defaults.clinic_name),
            doctor_name: doctor_name.clone(),
            qualification_line,
            address: pick(&profile.address, &defaults.address),
            tagline: defaults.tagline.clone(),
            date: format_display_date(&patient.date),
            registration_no: registration_no.clone(),
            phone: pick(&profile.mobile, &defaults.mobile),
        },
        patient: PatientBlock {
            name: patient.name.clone(),
            age: patient.age.clone(),
            gender: patient.gender.to_string(),
            diagnosis: patient.diagnosis.clone(),
        },
        medicines,
        note,
        footer: DocumentFooter {
            doctor_name,
            qualification,
            registration_no,
            credit: defaults.footer_credit.clone(),
        },
    }
}

/// Format an ISO date as `"<day> <abbrev month> <year>"`, or [`INVALID_DATE`].
pub fn format_display_date(date: &str) -> String {
    match parse_calendar_date(date) {
        Some(d) => d.format("%-d %b %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Render raw JSON shaped like `{patientData, medicines, note?}`.
///
/// Fails only when `patientData` or `medicines` is missing or has the wrong shape.
pub fn render_value(
    value: &serde_json::Value,
    profile: &ClinicianProfile,
    defaults: &RenderDefaults,
) -> Result<Document, RenderError> {
    let draft: PrescriptionDraft = serde_json::from_value(value.clone())?;
    Ok(Document::from_draft(&draft, profile, defaults))
}

impl Document {
    /// Render the current state of a draft.
    pub fn from_draft(
        draft: &PrescriptionDraft,
        profile: &ClinicianProfile,
        defaults: &RenderDefaults,
    ) -> Self {
        render_with(
            &draft.patient_data,
            &draft.medicines,
            draft.note(),
            profile,
            defaults,
        )
    }

    /// Render a saved prescription.
    ///
    /// Doctor fields embedded in the record win over `profile`; `profile` fills the rest.
    pub fn from_prescription(
        prescription: &Prescription,
        profile: &ClinicianProfile,
        defaults: &RenderDefaults,
    ) -> Self {
        let merged = match prescription.doctor.as_ref().and_then(|d| d.profile()) {
            Some(embedded) => merge_profiles(embedded, profile),
            None => profile.clone(),
        };
        render_with(
            &prescription.patient_data,
            &prescription.medicines,
            Some(prescription.note.as_str()),
            &merged,
            defaults,
        )
    }
}

fn pick(value: &Option<String>, fallback: &str) -> String {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn merge_profiles(primary: &ClinicianProfile, fallback: &ClinicianProfile) -> ClinicianProfile {
    let or = |a: &Option<String>, b: &Option<String>| a.clone().or_else(|| b.clone());
    ClinicianProfile {
        name: or(&primary.name, &fallback.name),
        qualification: or(&primary.qualification, &fallback.qualification),
        registration_no: or(&primary.registration_no, &fallback.registration_no),
        clinic_hospital_name: or(&primary.clinic_hospital_name, &fallback.clinic_hospital_name),
        address: or(&primary.address, &fallback.address),
        mobile: or(&primary.mobile, &fallback.mobile),
        specialty: or(&primary.specialty, &fallback.specialty),
        logo_pic: or(&primary.logo_pic, &fallback.logo_pic),
    }
}
