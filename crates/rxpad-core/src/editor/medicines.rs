//! Ordered medicine list editing.

use std::collections::HashSet;

use crate::models::{MedicineEntry, MedicineField};

use super::{EditorError, EditorResult};

/// Editor over an ordered list of medicine rows.
///
/// Ids are assigned as `max + 1` and never reused while a higher id survives; removal
/// never renumbers the remaining rows. A list already holding `u32::MAX` (only possible
/// when loaded from elsewhere) gets the lowest unused id instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MedicinesEditor {
    entries: Vec<MedicineEntry>,
}

impl MedicinesEditor {
    /// Take over an existing list.
    pub fn new(entries: Vec<MedicineEntry>) -> Self {
        Self { entries }
    }

    /// Append an empty row and return its id.
    pub fn add(&mut self) -> u32 {
        let id = self.next_id();
        self.entries.push(MedicineEntry::blank(id));
        id
    }

    /// Remove the row with `id`.
    pub fn remove(&mut self, id: u32) -> EditorResult<MedicineEntry> {
        let index = self.position(id)?;
        Ok(self.entries.remove(index))
    }

    /// Replace one field of the row with `id`.
    pub fn update(&mut self, id: u32, field: MedicineField, value: impl Into<String>) -> EditorResult<()> {
        let index = self.position(id)?;
        let entry = &mut self.entries[index];
        match field {
            MedicineField::Name => entry.name = value.into(),
            MedicineField::Dose => entry.dose = value.into(),
        }
        Ok(())
    }

    /// Id the next [`add`](Self::add) will assign.
    pub fn next_id(&self) -> u32 {
        let max = self.entries.iter().map(|entry| entry.id).max();
        match max {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| self.lowest_unused_id()),
        }
    }

    pub fn entries(&self) -> &[MedicineEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hand the whole list back to its owner.
    pub fn into_entries(self) -> Vec<MedicineEntry> {
        self.entries
    }

    fn lowest_unused_id(&self) -> u32 {
        let used: HashSet<u32> = self.entries.iter().map(|entry| entry.id).collect();
        // Fewer than u32::MAX rows always leave a gap.
        (1..=u32::MAX).find(|id| !used.contains(id)).unwrap_or(0)
    }

    fn position(&self, id: u32) -> EditorResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(EditorError::MedicineNotFound(id))
    }
}
