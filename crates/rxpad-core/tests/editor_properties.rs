//! Property tests for the medicines editor.

use std::collections::HashSet;

use proptest::prelude::*;
use rxpad_core::models::{MedicineEntry, MedicineField, PrescriptionDraft};
use rxpad_core::MedicinesEditor;

#[derive(Debug, Clone)]
enum Op {
    Add,
    Remove(usize),
    Rename(usize, String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Add),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => (any::<usize>(), "[a-z ]{0,8}").prop_map(|(i, s)| Op::Rename(i, s)),
    ]
}

fn pick_id(entries: &[MedicineEntry], index: usize) -> Option<u32> {
    if entries.is_empty() {
        None
    } else {
        Some(entries[index % entries.len()].id)
    }
}

proptest! {
    #[test]
    fn ids_stay_unique(ops in prop::collection::vec(op(), 0..60)) {
        let mut editor = MedicinesEditor::new(vec![MedicineEntry::blank(1)]);

        for op in ops {
            match op {
                Op::Add => {
                    let before: Vec<u32> = editor.entries().iter().map(|m| m.id).collect();
                    let id = editor.add();
                    prop_assert!(before.iter().all(|&b| b < id));
                }
                Op::Remove(i) => {
                    if let Some(id) = pick_id(editor.entries(), i) {
                        prop_assert!(editor.remove(id).is_ok());
                        prop_assert!(editor.remove(id).is_err());
                    }
                }
                Op::Rename(i, name) => {
                    if let Some(id) = pick_id(editor.entries(), i) {
                        editor.update(id, MedicineField::Name, name).unwrap();
                    }
                }
            }

            let ids: HashSet<u32> = editor.entries().iter().map(|m| m.id).collect();
            prop_assert_eq!(ids.len(), editor.len());
        }
    }

    #[test]
    fn update_touches_one_entry(adds in 1usize..10, target in any::<usize>(), dose in "[0-9]{1,4}mg") {
        let mut draft = PrescriptionDraft::default();
        for _ in 0..adds {
            draft.add_medicine();
        }
        let before = draft.medicines.clone();
        let id = pick_id(&before, target).unwrap();

        draft.update_medicine(id, MedicineField::Dose, dose.clone()).unwrap();

        for (old, new) in before.iter().zip(&draft.medicines) {
            prop_assert_eq!(old.id, new.id);
            prop_assert_eq!(&old.name, &new.name);
            if new.id == id {
                prop_assert_eq!(&new.dose, &dose);
            } else {
                prop_assert_eq!(&old.dose, &new.dose);
            }
        }
    }
}

#[test]
fn add_on_empty_starts_at_one() {
    let mut editor = MedicinesEditor::new(Vec::new());
    assert_eq!(editor.add(), 1);
    assert_eq!(editor.entries(), &[MedicineEntry::blank(1)]);
}
