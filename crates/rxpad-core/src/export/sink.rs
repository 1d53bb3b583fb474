//! Export backends.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{ExportJob, ExportResult, OutputTarget};

/// Something that consumes rendered documents: a print spooler, a PDF engine, a window.
pub trait DocumentSink {
    fn submit(&mut self, job: &ExportJob) -> ExportResult<()>;
}

/// Writes each job's HTML page into a directory.
///
/// PDF jobs are written under the PDF file name with an `.html` extension, ready for an
/// external HTML-to-PDF converter.
pub struct HtmlDirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl HtmlDirectorySink {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DocumentSink for HtmlDirectorySink {
    fn submit(&mut self, job: &ExportJob) -> ExportResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(job.file_name()).with_extension("html");
        std::fs::write(&path, &job.html)?;
        info!(target: "rxpad::export", path = %path.display(), target_kind = target_kind(&job.target), "wrote document");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps jobs in memory; useful for previews and tests.
#[derive(Default)]
pub struct MemorySink {
    pub jobs: Vec<ExportJob>,
}

impl DocumentSink for MemorySink {
    fn submit(&mut self, job: &ExportJob) -> ExportResult<()> {
        self.jobs.push(job.clone());
        Ok(())
    }
}

fn target_kind(target: &OutputTarget) -> &'static str {
    match target {
        OutputTarget::Preview => "preview",
        OutputTarget::Print => "print",
        OutputTarget::Pdf(_) => "pdf",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClinicianProfile, PrescriptionDraft};
    use crate::render::{Document, RenderDefaults};

    #[test]
    fn test_directory_sink_writes_pdf_page() {
        let dir = tempfile::tempdir().unwrap();
        let draft = PrescriptionDraft::default();
        let doc = Document::from_draft(&draft, &ClinicianProfile::default(), &RenderDefaults::default());
        let job = ExportJob::pdf(doc);

        let mut sink = HtmlDirectorySink::new(dir.path());
        sink.submit(&job).unwrap();

        let path = dir.path().join("prescription.html");
        assert_eq!(sink.written(), &[path.clone()]);
        assert_eq!(std::fs::read_to_string(path).unwrap(), job.html);
    }

    #[test]
    fn test_print_and_pdf_pages_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let doc = Document::from_draft(
            &PrescriptionDraft::default(),
            &ClinicianProfile::default(),
            &RenderDefaults::default(),
        );

        let mut sink = HtmlDirectorySink::new(dir.path());
        sink.submit(&ExportJob::print(doc.clone())).unwrap();
        sink.submit(&ExportJob::pdf(doc)).unwrap();

        assert_eq!(
            sink.written(),
            &[
                dir.path().join("prescription-print.html"),
                dir.path().join("prescription.html"),
            ]
        );
        assert!(sink.written().iter().all(|path| path.exists()));
    }
}
