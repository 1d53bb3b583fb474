//! Medicine line items.

use serde::{Deserialize, Serialize};

/// One medicine row of a prescription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MedicineEntry {
    /// Id unique within the owning list
    pub id: u32,
    /// Medicine name
    #[serde(default)]
    pub name: String,
    /// Dose and schedule text
    #[serde(default)]
    pub dose: String,
}

impl MedicineEntry {
    /// Empty row with the given id.
    pub fn blank(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            dose: String::new(),
        }
    }

    /// Whether this row would appear on a rendered document.
    pub fn is_printable(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Editable fields of a [`MedicineEntry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicineField {
    Name,
    Dose,
}
