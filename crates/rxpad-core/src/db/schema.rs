//! SQLite schema definition.

/// Complete database schema for rxpad's local store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Prescriptions
-- ============================================================================

CREATE TABLE IF NOT EXISTS prescriptions (
    id TEXT PRIMARY KEY,
    doctor_id TEXT,
    patient_name TEXT NOT NULL,                  -- copied out of patient_data for filtering
    prescription_date TEXT NOT NULL,             -- YYYY-MM-DD, copied out for filtering
    patient_data TEXT NOT NULL,                  -- JSON object
    medicines TEXT NOT NULL DEFAULT '[]',        -- JSON array of {id, name, dose}
    note TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_prescriptions_name ON prescriptions(patient_name);
CREATE INDEX IF NOT EXISTS idx_prescriptions_date ON prescriptions(prescription_date);
CREATE INDEX IF NOT EXISTS idx_prescriptions_created ON prescriptions(created_at);

-- ============================================================================
-- Auth session (single row)
-- ============================================================================

CREATE TABLE IF NOT EXISTS session (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    token TEXT NOT NULL,
    user TEXT,                                   -- JSON user object, NULL until fetched
    saved_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
