//! Plain-text serialization of a [`Document`], for terminals and logs.

use super::Document;

/// Render the document as plain text.
pub fn to_text(doc: &Document) -> String {
    let h = &doc.header;
    let mut lines = vec![
        h.clinic_name.clone(),
        h.doctor_name.clone(),
        h.qualification_line.clone(),
        h.address.clone(),
    ];
    if let Some(tagline) = &h.tagline {
        lines.push(tagline.clone());
    }
    lines.push(format!("Date: {}", h.date));
    lines.push(format!("Reg. No. {}", h.registration_no));
    lines.push(format!("Ph: {}", h.phone));
    lines.push(String::new());

    let p = &doc.patient;
    lines.push(p.name.clone());
    lines.push(format!("Age: {}", p.age));
    lines.push(format!("Gender: {}", p.gender));
    lines.push(format!("Diagnosis: {}", p.diagnosis));
    lines.push(String::new());

    lines.push("Medicines:".to_string());
    for medicine in &doc.medicines {
        lines.push(format!("  - {} -- {}", medicine.name, medicine.dose));
    }

    if let Some(note) = &doc.note {
        lines.push(String::new());
        lines.push("Notes".to_string());
        lines.push(note.clone());
    }

    let f = &doc.footer;
    lines.push(String::new());
    lines.push(f.doctor_name.clone());
    lines.push(f.qualification.clone());
    lines.push(format!("Reg. No. {}", f.registration_no));
    if let Some(credit) = &f.credit {
        lines.push(credit.title.clone());
        lines.push(credit.subtitle.clone());
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
