//! Print and PDF export of rendered documents.
//!
//! The core does not rasterize or drive a printer. It builds an [`ExportJob`] carrying a
//! fully rendered page plus the target's settings and hands it to a [`DocumentSink`].

mod sink;

pub use sink::*;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::{html, Document};

/// Export errors.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export backend failed: {0}")]
    Backend(String),
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Where a rendered document is going.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutputTarget {
    /// On-screen preview
    Preview,
    /// The host's print dialog
    Print,
    /// PDF file
    Pdf(PdfOptions),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    A4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// PDF export settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    /// Output file name
    pub filename: String,
    pub format: PageFormat,
    pub orientation: Orientation,
    /// Page margin in inches
    pub margin: f32,
    /// JPEG quality for rasterized content (0.0 - 1.0)
    pub image_quality: f32,
    /// Rasterization scale factor
    pub scale: f32,
    /// Keep the whole document on one page where possible
    pub avoid_page_breaks: bool,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            filename: "prescription.pdf".into(),
            format: PageFormat::A4,
            orientation: Orientation::Portrait,
            margin: 0.0,
            image_quality: 0.98,
            scale: 2.0,
            avoid_page_breaks: true,
        }
    }
}

/// A rendered document ready for an export backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportJob {
    pub target: OutputTarget,
    /// The structured document
    pub document: Document,
    /// HTML page rendered from `document`
    pub html: String,
}

impl ExportJob {
    /// Render `document` once for the given target.
    pub fn new(document: Document, target: OutputTarget) -> Self {
        let html = html::to_html(&document);
        Self {
            target,
            document,
            html,
        }
    }

    pub fn preview(document: Document) -> Self {
        Self::new(document, OutputTarget::Preview)
    }

    pub fn print(document: Document) -> Self {
        Self::new(document, OutputTarget::Print)
    }

    pub fn pdf(document: Document) -> Self {
        Self::new(document, OutputTarget::Pdf(PdfOptions::default()))
    }

    /// Suggested file name for this job.
    pub fn file_name(&self) -> &str {
        match &self.target {
            OutputTarget::Pdf(options) => &options.filename,
            OutputTarget::Preview => "prescription.html",
            OutputTarget::Print => "prescription-print.html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicianProfile, PrescriptionDraft};
    use crate::render::RenderDefaults;

    fn document() -> Document {
        let draft = PrescriptionDraft::new(chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        Document::from_draft(&draft, &ClinicianProfile::default(), &RenderDefaults::default())
    }

    #[test]
    fn test_pdf_defaults() {
        let options = PdfOptions::default();
        assert_eq!(options.filename, "prescription.pdf");
        assert_eq!(options.format, PageFormat::A4);
        assert_eq!(options.orientation, Orientation::Portrait);
    }

    #[test]
    fn test_targets_share_rendering() {
        let preview = ExportJob::preview(document());
        let print = ExportJob::print(document());
        let pdf = ExportJob::pdf(document());

        assert_eq!(preview.html, print.html);
        assert_eq!(print.html, pdf.html);
        assert_eq!(preview.document, pdf.document);
        assert_eq!(pdf.file_name(), "prescription.pdf");
        assert_eq!(print.file_name(), "prescription-print.html");
        assert_ne!(preview.file_name(), print.file_name());
    }
}
