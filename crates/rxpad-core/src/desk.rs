//! The prescription desk: one draft, its live preview, and the saved-prescriptions list.
//!
//! [`PrescriptionDesk`] wires the draft model, renderer, listing controller and a
//! [`PrescriptionStore`] together and reports every outcome through its [`NoticeQueue`].

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::export::{DocumentSink, ExportJob, OutputTarget, PdfOptions};
use crate::listing::{Completion, FilterController};
use crate::models::{ClinicianProfile, Prescription, PrescriptionDraft};
use crate::notice::{Notice, NoticeQueue};
use crate::render::{Document, RenderDefaults};
use crate::store::PrescriptionStore;

pub struct PrescriptionDesk<S: PrescriptionStore> {
    store: S,
    draft: PrescriptionDraft,
    listing: FilterController,
    notices: NoticeQueue,
    profile: ClinicianProfile,
    defaults: RenderDefaults,
}

impl<S: PrescriptionStore> PrescriptionDesk<S> {
    /// Desk with a fresh draft dated today.
    pub fn new(store: S, profile: ClinicianProfile) -> Self {
        Self {
            store,
            draft: PrescriptionDraft::default(),
            listing: FilterController::new(),
            notices: NoticeQueue::new(),
            profile,
            defaults: RenderDefaults::default(),
        }
    }

    pub fn with_defaults(mut self, defaults: RenderDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn draft(&self) -> &PrescriptionDraft {
        &self.draft
    }

    /// Mutable draft access. Call [`preview`](Self::preview) afterwards to refresh.
    pub fn draft_mut(&mut self) -> &mut PrescriptionDraft {
        &mut self.draft
    }

    pub fn profile(&self) -> &ClinicianProfile {
        &self.profile
    }

    pub fn set_profile(&mut self, profile: ClinicianProfile) {
        self.profile = profile;
    }

    pub fn listing(&self) -> &FilterController {
        &self.listing
    }

    /// Filter inputs; typing here never triggers a fetch.
    pub fn listing_mut(&mut self) -> &mut FilterController {
        &mut self.listing
    }

    pub fn notices(&self) -> &NoticeQueue {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Render the draft as it stands.
    pub fn preview(&self) -> Document {
        Document::from_draft(&self.draft, &self.profile, &self.defaults)
    }

    /// Reset the draft to a blank form dated `today`.
    pub fn clear(&mut self, today: NaiveDate) {
        self.draft.clear(today);
    }

    /// Replace the draft with a saved prescription's content.
    pub fn load(&mut self, prescription: &Prescription) {
        info!(id = %prescription.id, "loading prescription into draft");
        self.draft = PrescriptionDraft::from_prescription(prescription);
    }

    /// Save the draft as a new prescription. The draft is kept either way.
    pub fn save(&mut self) -> Option<Prescription> {
        if let Err(err) = self.draft.validate() {
            warn!(error = %err, "draft rejected before save");
            self.notices.error(err.to_string());
            return None;
        }
        match self.store.create(&self.draft) {
            Ok(saved) => {
                info!(id = %saved.id, "prescription saved");
                self.notices.success("Prescription saved successfully!");
                Some(saved)
            }
            Err(err) => {
                warn!(error = %err, "saving prescription failed");
                self.notices
                    .push(Notice::from_error(&err, "Failed to save prescription"));
                None
            }
        }
    }

    /// Overwrite the prescription the draft was loaded from.
    ///
    /// Falls back to [`save`](Self::save) for drafts that were never loaded.
    pub fn save_over_loaded(&mut self) -> Option<Prescription> {
        let Some(id) = self.draft.loaded_from.clone() else {
            return self.save();
        };
        if let Err(err) = self.draft.validate() {
            warn!(error = %err, "draft rejected before update");
            self.notices.error(err.to_string());
            return None;
        }
        match self.store.update(&id, &self.draft) {
            Ok(saved) => {
                info!(id = %saved.id, "prescription updated");
                self.notices.success("Prescription updated successfully!");
                Some(saved)
            }
            Err(err) => {
                warn!(id = %id, error = %err, "updating prescription failed");
                self.notices
                    .push(Notice::from_error(&err, "Failed to update prescription"));
                None
            }
        }
    }

    /// Fetch with the currently applied filter.
    pub fn refresh(&mut self) -> Completion<S::Error> {
        let ticket = self.listing.load();
        self.listing.run(&self.store, ticket, &mut self.notices)
    }

    pub fn apply_filters(&mut self) -> Completion<S::Error> {
        let ticket = self.listing.apply();
        self.listing.run(&self.store, ticket, &mut self.notices)
    }

    pub fn reset_filters(&mut self) -> Completion<S::Error> {
        let ticket = self.listing.reset();
        self.listing.run(&self.store, ticket, &mut self.notices)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.listing.delete(&self.store, id, &mut self.notices)
    }

    /// Fetch one prescription and load it into the draft.
    pub fn open(&mut self, id: &str) -> bool {
        match self.store.get(id) {
            Ok(prescription) => {
                self.load(&prescription);
                true
            }
            Err(err) => {
                warn!(id, error = %err, "fetching prescription failed");
                self.notices
                    .push(Notice::from_error(&err, "Failed to load prescription"));
                false
            }
        }
    }

    /// Send the current preview to a print backend.
    pub fn print(&mut self, sink: &mut dyn DocumentSink) -> bool {
        let job = ExportJob::print(self.preview());
        self.submit(sink, job, "Failed to print prescription")
    }

    /// Send the current preview to a PDF backend.
    pub fn export_pdf(&mut self, sink: &mut dyn DocumentSink, options: PdfOptions) -> bool {
        let job = ExportJob::new(self.preview(), OutputTarget::Pdf(options));
        self.submit(sink, job, "Failed to export PDF")
    }

    fn submit(&mut self, sink: &mut dyn DocumentSink, job: ExportJob, failure: &str) -> bool {
        match sink.submit(&job) {
            Ok(()) => true,
            Err(err) => {
                warn!(file = job.file_name(), error = %err, "export failed");
                self.notices.error(failure);
                false
            }
        }
    }
}
