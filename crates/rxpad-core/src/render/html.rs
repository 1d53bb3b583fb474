//! HTML serialization of a [`Document`].
//!
//! Produces a self-contained A4 portrait page. Every piece of user text is escaped.

use super::Document;

const STYLE: &str = r#"
@page { size: A4 portrait; margin: 0; }
body { font-family: sans-serif; margin: 0; }
#prescription { padding: 2rem; max-width: 56rem; margin: 0 auto; min-height: 100vh; display: flex; flex-direction: column; }
.top { display: flex; justify-content: space-between; border-bottom: 1px solid #d1d5db; padding-bottom: 1rem; margin-bottom: 1.5rem; }
.clinic { display: flex; gap: 1rem; }
.clinic img { width: 4rem; height: 4rem; object-fit: contain; }
.clinic h1 { color: #0d66a5; margin: 0; }
.meta { text-align: right; font-size: 0.75rem; white-space: nowrap; }
.body { flex-grow: 1; }
.footer { display: flex; justify-content: space-between; border-top: 7px solid #2563eb; padding-top: 1rem; }
"#;

/// Render the document as a complete HTML page.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::new();

    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<title>Prescription</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n");
    out.push_str("<div id=\"prescription\">\n");

    // Header
    let h = &doc.header;
    out.push_str("<div class=\"top\">\n<div class=\"clinic\">\n");
    out.push_str(&format!(
        "<img src=\"{}\" alt=\"Clinic Logo\">\n<div>\n",
        escape_html(&h.logo)
    ));
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(&h.clinic_name)));
    out.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(&h.doctor_name)));
    out.push_str(&format!("<p>{}</p>\n", escape_html(&h.qualification_line)));
    out.push_str(&format!("<p>{}</p>\n", escape_html(&h.address)));
    if let Some(tagline) = &h.tagline {
        out.push_str(&format!("<p><em>{}</em></p>\n", escape_html(tagline)));
    }
    out.push_str("</div>\n</div>\n<div class=\"meta\">\n");
    out.push_str(&format!("<p><strong>Date:</strong> {}</p>\n", escape_html(&h.date)));
    out.push_str(&format!(
        "<p><strong>Reg. No.</strong> {}</p>\n",
        escape_html(&h.registration_no)
    ));
    out.push_str(&format!("<p><strong>Ph:</strong> {}</p>\n", escape_html(&h.phone)));
    out.push_str("</div>\n</div>\n");

    // Body
    let p = &doc.patient;
    out.push_str("<div class=\"body\">\n");
    out.push_str(&format!("<div><strong>{}</strong></div>\n", escape_html(&p.name)));
    out.push_str(&format!("<div><strong>Age:</strong> {}</div>\n", escape_html(&p.age)));
    out.push_str(&format!("<div><strong>Gender:</strong> {}</div>\n", escape_html(&p.gender)));
    out.push_str(&format!(
        "<div><strong>Diagnosis:</strong> {}</div>\n",
        escape_multiline(&p.diagnosis)
    ));

    out.push_str("<div class=\"medicines\">\n<strong>Medicines:</strong>\n<ul>\n");
    for medicine in &doc.medicines {
        out.push_str(&format!(
            "<li>{} &nbsp;&nbsp;--&nbsp;&nbsp; {}</li>\n",
            escape_html(&medicine.name),
            escape_html(&medicine.dose)
        ));
    }
    out.push_str("</ul>\n</div>\n");

    if let Some(note) = &doc.note {
        out.push_str(&format!(
            "<div class=\"note\">\n<strong>Notes</strong>\n<p>{}</p>\n</div>\n",
            escape_multiline(note)
        ));
    }
    out.push_str("</div>\n");

    // Footer
    let f = &doc.footer;
    out.push_str("<div class=\"footer\">\n<div>\n");
    out.push_str(&format!("<p><strong>{}</strong></p>\n", escape_html(&f.doctor_name)));
    out.push_str(&format!("<p>{}</p>\n", escape_html(&f.qualification)));
    out.push_str(&format!("<p>Reg. No. {}</p>\n", escape_html(&f.registration_no)));
    out.push_str("</div>\n");
    if let Some(credit) = &f.credit {
        out.push_str(&format!(
            "<div>\n<p><strong>{}</strong></p>\n<p>{}</p>\n</div>\n",
            escape_html(&credit.title),
            escape_html(&credit.subtitle)
        ));
    }
    out.push_str("</div>\n</div>\n</body>\n</html>\n");

    out
}

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Escape text and keep its line breaks.
fn escape_multiline(s: &str) -> String {
    s.lines().map(escape_html).collect::<Vec<_>>().join("<br>")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicianProfile, Gender, MedicineEntry, PatientData};
    use crate::render::render;

    fn patient() -> PatientData {
        PatientData {
            name: "<script>alert(1)</script>".into(),
            age: "40".into(),
            gender: Gender::Female,
            diagnosis: "Cough\nCold & fever".into(),
            date: "2024-01-05".into(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(escape_html("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_user_text_is_escaped() {
        let doc = render(&patient(), &[], None, &ClinicianProfile::default());
        let html = to_html(&doc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Cough<br>Cold &amp; fever"));
    }

    #[test]
    fn test_page_contents() {
        let meds = vec![
            MedicineEntry {
                id: 1,
                name: "Paracetamol".into(),
                dose: "500mg".into(),
            },
            MedicineEntry::blank(2),
        ];
        let doc = render(&patient(), &meds, Some("Drink fluids"), &ClinicianProfile::default());
        let html = to_html(&doc);

        assert!(html.contains("size: A4 portrait"));
        assert!(html.contains("<strong>Date:</strong> 5 Jan 2024"));
        assert_eq!(html.matches("<li>").count(), 1);
        assert!(html.contains("Paracetamol"));
        assert!(html.contains("Drink fluids"));
    }

    #[test]
    fn test_note_section_absent_without_note() {
        let doc = render(&patient(), &[], None, &ClinicianProfile::default());
        assert!(!to_html(&doc).contains("class=\"note\""));
    }
}
