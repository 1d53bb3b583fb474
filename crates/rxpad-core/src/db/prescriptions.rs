//! Prescription database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::listing::PrescriptionFilter;
use crate::models::{parse_calendar_date, DoctorRef, MedicineEntry, PatientData, Prescription};

const SELECT_COLUMNS: &str = r#"
    SELECT id, doctor_id, patient_data, medicines, note, created_at, updated_at
    FROM prescriptions
"#;

impl Database {
    /// Insert a new prescription.
    pub fn insert_prescription(&self, prescription: &Prescription) -> DbResult<()> {
        let patient_json = serde_json::to_string(&prescription.patient_data)?;
        let medicines_json = serde_json::to_string(&prescription.medicines)?;
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true);

        self.conn.execute(
            r#"
            INSERT INTO prescriptions (
                id, doctor_id, patient_name, prescription_date, patient_data,
                medicines, note, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                prescription.id,
                prescription.doctor.as_ref().map(|d| d.id().to_string()),
                prescription.patient_data.name,
                sortable_date(&prescription.patient_data.date),
                patient_json,
                medicines_json,
                prescription.note,
                prescription.created_at.clone().unwrap_or_else(|| now.clone()),
                prescription.updated_at.clone().unwrap_or(now),
            ],
        )?;
        Ok(())
    }

    /// Replace the content of an existing prescription. Identity and doctor are kept.
    pub fn replace_prescription(&self, prescription: &Prescription) -> DbResult<bool> {
        let patient_json = serde_json::to_string(&prescription.patient_data)?;
        let medicines_json = serde_json::to_string(&prescription.medicines)?;

        let rows_affected = self.conn.execute(
            r#"
            UPDATE prescriptions SET
                patient_name = ?2,
                prescription_date = ?3,
                patient_data = ?4,
                medicines = ?5,
                note = ?6,
                updated_at = ?7
            WHERE id = ?1
            "#,
            params![
                prescription.id,
                prescription.patient_data.name,
                sortable_date(&prescription.patient_data.date),
                patient_json,
                medicines_json,
                prescription.note,
                chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Get a prescription by ID.
    pub fn get_prescription(&self, id: &str) -> DbResult<Option<Prescription>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?"),
                [id],
                PrescriptionRow::from_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// List prescriptions matching `filter`, newest first.
    ///
    /// `search` is a case-insensitive substring of the patient name; the date bounds are
    /// inclusive and compared as calendar dates, whatever form they were written in.
    pub fn list_prescriptions(&self, filter: &PrescriptionFilter) -> DbResult<Vec<Prescription>> {
        let mut stmt = self.conn.prepare(&format!(
            r#"{SELECT_COLUMNS}
            WHERE (?1 = '' OR instr(lower(patient_name), lower(?1)) > 0)
              AND (?2 = '' OR prescription_date >= ?2)
              AND (?3 = '' OR prescription_date <= ?3)
            ORDER BY created_at DESC, rowid DESC
            "#
        ))?;

        let rows = stmt.query_map(
            params![
                filter.search.trim(),
                sortable_date(&filter.from_date),
                sortable_date(&filter.to_date)
            ],
            PrescriptionRow::from_row,
        )?;

        let mut prescriptions = Vec::new();
        for row in rows {
            prescriptions.push(row?.try_into()?);
        }
        Ok(prescriptions)
    }

    /// Delete a prescription.
    pub fn delete_prescription(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM prescriptions WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Number of stored prescriptions.
    pub fn count_prescriptions(&self) -> DbResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM prescriptions", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// `YYYY-MM-DD` for anything that parses as a calendar date, so text comparison in SQL
/// orders by date. Unparseable input is kept as typed.
fn sortable_date(raw: &str) -> String {
    match parse_calendar_date(raw) {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => raw.trim().to_string(),
    }
}

/// Intermediate row struct for database mapping.
struct PrescriptionRow {
    id: String,
    doctor_id: Option<String>,
    patient_data: String,
    medicines: String,
    note: String,
    created_at: String,
    updated_at: String,
}

impl PrescriptionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            doctor_id: row.get(1)?,
            patient_data: row.get(2)?,
            medicines: row.get(3)?,
            note: row.get(4)?,
            created_at: row.get(5)?,
            updated_at: row.get(6)?,
        })
    }
}

impl TryFrom<PrescriptionRow> for Prescription {
    type Error = DbError;

    fn try_from(row: PrescriptionRow) -> Result<Self, Self::Error> {
        let patient_data: PatientData = serde_json::from_str(&row.patient_data)?;
        let medicines: Vec<MedicineEntry> = serde_json::from_str(&row.medicines)?;

        Ok(Prescription {
            id: row.id,
            doctor: row.doctor_id.map(DoctorRef::Id),
            patient_data,
            medicines,
            note: row.note,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PrescriptionDraft;

    fn make_prescription(id: &str, name: &str, date: &str) -> Prescription {
        let mut draft = PrescriptionDraft::default();
        draft.patient_data.name = name.into();
        draft.patient_data.date = date.into();
        draft.medicines[0].name = "Paracetamol".into();
        draft.medicines[0].dose = "500mg".into();
        Prescription::from_draft(id.into(), Some(DoctorRef::Id("doc-1".into())), &draft)
    }

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let p = make_prescription("p1", "John Doe", "2024-01-05");
        db.insert_prescription(&p).unwrap();

        let fetched = db.get_prescription("p1").unwrap().unwrap();
        assert_eq!(fetched.patient_data, p.patient_data);
        assert_eq!(fetched.medicines, p.medicines);
        assert_eq!(fetched.doctor, Some(DoctorRef::Id("doc-1".into())));
        assert!(db.get_prescription("missing").unwrap().is_none());
    }

    #[test]
    fn test_filter_by_name_and_dates() {
        let db = Database::open_in_memory().unwrap();
        db.insert_prescription(&make_prescription("p1", "John Doe", "2024-01-05"))
            .unwrap();
        db.insert_prescription(&make_prescription("p2", "Johnny Cash", "2024-02-10"))
            .unwrap();
        db.insert_prescription(&make_prescription("p3", "Asha", "2024-03-01"))
            .unwrap();

        let by_name = db.list_prescriptions(&PrescriptionFilter::search("JOHN")).unwrap();
        assert_eq!(by_name.len(), 2);

        let by_range = db
            .list_prescriptions(&PrescriptionFilter {
                search: String::new(),
                from_date: "2024-02-10".into(),
                to_date: "2024-03-01".into(),
            })
            .unwrap();
        let ids: Vec<&str> = by_range.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p2"]);

        let all = db.list_prescriptions(&PrescriptionFilter::default()).unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, "p3");
    }

    #[test]
    fn test_date_bounds_see_non_canonical_dates() {
        let db = Database::open_in_memory().unwrap();
        db.insert_prescription(&make_prescription("p1", "John Doe", "2024-01-05T10:30:00Z"))
            .unwrap();
        db.insert_prescription(&make_prescription("p2", "Asha", "2024-1-31"))
            .unwrap();

        let same_day = db
            .list_prescriptions(&PrescriptionFilter {
                search: String::new(),
                from_date: "2024-01-05".into(),
                to_date: "2024-01-05".into(),
            })
            .unwrap();
        assert_eq!(same_day.len(), 1);
        assert_eq!(same_day[0].id, "p1");
        assert_eq!(same_day[0].patient_data.date, "2024-01-05T10:30:00Z");

        let january = db
            .list_prescriptions(&PrescriptionFilter {
                search: String::new(),
                from_date: "2024-1-1".into(),
                to_date: "2024-01-31".into(),
            })
            .unwrap();
        assert_eq!(january.len(), 2);
    }

    #[test]
    fn test_sortable_date() {
        assert_eq!(sortable_date("2024-1-5"), "2024-01-05");
        assert_eq!(sortable_date(" 2024-01-05T23:59:00+05:30 "), "2024-01-05");
        assert_eq!(sortable_date(""), "");
        assert_eq!(sortable_date("soon"), "soon");
    }

    #[test]
    fn test_search_is_literal() {
        let db = Database::open_in_memory().unwrap();
        db.insert_prescription(&make_prescription("p1", "John Doe", "2024-01-05"))
            .unwrap();
        assert!(db
            .list_prescriptions(&PrescriptionFilter::search("%"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_replace_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let mut p = make_prescription("p1", "John Doe", "2024-01-05");
        db.insert_prescription(&p).unwrap();

        p.note = "Review after 3 days".into();
        p.patient_data.name = "John D.".into();
        assert!(db.replace_prescription(&p).unwrap());
        let fetched = db.get_prescription("p1").unwrap().unwrap();
        assert_eq!(fetched.note, "Review after 3 days");
        assert_eq!(
            db.list_prescriptions(&PrescriptionFilter::search("john d.")).unwrap().len(),
            1
        );

        assert!(db.delete_prescription("p1").unwrap());
        assert!(!db.delete_prescription("p1").unwrap());
        assert_eq!(db.count_prescriptions().unwrap(), 0);
    }
}
