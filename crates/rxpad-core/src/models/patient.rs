//! Patient models.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Patient gender as captured on the prescription form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
    /// Also used for any value the backend sends that we don't recognise
    #[serde(other)]
    Other,
}

impl Gender {
    /// Display label, identical to the wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Patient section of a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientData {
    /// Patient name (may be empty while editing)
    #[serde(default)]
    pub name: String,
    /// Age as typed; kept as text
    #[serde(default)]
    pub age: String,
    /// Gender
    #[serde(default)]
    pub gender: Gender,
    /// Free-text, possibly multi-line diagnosis
    #[serde(default)]
    pub diagnosis: String,
    /// Prescription date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
}

/// Text fields of [`PatientData`] that a form can edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientField {
    Name,
    Age,
    Diagnosis,
    Date,
}

impl PatientData {
    /// Blank patient section dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            age: String::new(),
            gender: Gender::default(),
            diagnosis: String::new(),
            date: today.format("%Y-%m-%d").to_string(),
        }
    }

    /// Replace a single text field.
    pub fn set(&mut self, field: PatientField, value: impl Into<String>) {
        let value = value.into();
        match field {
            PatientField::Name => self.name = value,
            PatientField::Age => self.age = value,
            PatientField::Diagnosis => self.diagnosis = value,
            PatientField::Date => self.date = value,
        }
    }

    /// The prescription date, if it parses as a calendar date.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.date)
    }
}

impl Default for PatientData {
    fn default() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

/// Parse an ISO calendar date (`2024-01-05`) or a full RFC 3339 timestamp.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_patient_is_dated() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let patient = PatientData::new(today);
        assert_eq!(patient.date, "2024-03-09");
        assert_eq!(patient.gender, Gender::Male);
        assert!(patient.name.is_empty());
    }

    #[test]
    fn test_set_field() {
        let mut patient = PatientData::default();
        patient.set(PatientField::Name, "Asha Verma");
        patient.set(PatientField::Age, "42");
        assert_eq!(patient.name, "Asha Verma");
        assert_eq!(patient.age, "42");
    }

    #[test]
    fn test_parse_calendar_date() {
        assert_eq!(
            parse_calendar_date("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_calendar_date("2024-01-05T10:30:00Z"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn test_unknown_gender_maps_to_other() {
        let patient: PatientData = serde_json::from_str(
            r#"{"name":"A","age":"3","gender":"Unspecified","diagnosis":"","date":"2024-01-01"}"#,
        )
        .unwrap();
        assert_eq!(patient.gender, Gender::Other);
    }
}
