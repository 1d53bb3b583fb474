//! Saved-prescription listing: filter state, fetch sequencing, and paging.
//!
//! The controller keeps two layers of filter state. Typing only touches the *input*
//! layer; the *applied* layer changes on [`FilterController::apply`] or
//! [`FilterController::reset`], and only those (plus the initial
//! [`FilterController::load`]) issue a fetch.
//!
//! Fetches are described by [`FetchTicket`]s. A host may run the request however it
//! likes and report back through [`FilterController::complete`]; results for any ticket
//! but the most recently issued one are dropped, so the list always reflects the last
//! applied filter even when responses arrive out of order.

mod pager;

pub use pager::*;

use tracing::{debug, info, warn};

use crate::models::Prescription;
use crate::notice::{Notice, NoticeQueue};
use crate::store::PrescriptionStore;

/// Listing filter. Empty fields are unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrescriptionFilter {
    /// Patient name substring
    pub search: String,
    /// Inclusive lower bound, `YYYY-MM-DD`
    pub from_date: String,
    /// Inclusive upper bound, `YYYY-MM-DD`
    pub to_date: String,
}

impl PrescriptionFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.query_pairs().is_empty()
    }

    /// Query parameters for the non-empty fields, in wire names.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("search", &self.search),
            ("fromDate", &self.from_date),
            ("toDate", &self.to_date),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            let value = value.trim();
            (!value.is_empty()).then(|| (key, value.to_string()))
        })
        .collect()
    }
}

/// A fetch the controller wants performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    filter: PrescriptionFilter,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// The filter to send.
    pub fn filter(&self) -> &PrescriptionFilter {
        &self.filter
    }
}

/// What happened to a completed fetch.
#[derive(Debug)]
pub enum Completion<E> {
    /// Results replaced the displayed list
    Applied(usize),
    /// A newer fetch was issued; results discarded
    Stale,
    /// The fetch failed; the displayed list is unchanged
    Failed(E),
}

/// Filter and list state for the saved-prescriptions view.
#[derive(Debug, Default)]
pub struct FilterController {
    input: PrescriptionFilter,
    applied: PrescriptionFilter,
    prescriptions: Vec<Prescription>,
    issued: u64,
    in_flight: bool,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter as typed.
    pub fn input(&self) -> &PrescriptionFilter {
        &self.input
    }

    /// Filter the displayed list corresponds to.
    pub fn applied(&self) -> &PrescriptionFilter {
        &self.applied
    }

    pub fn prescriptions(&self) -> &[Prescription] {
        &self.prescriptions
    }

    /// Whether the most recent fetch is still outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    pub fn set_search(&mut self, value: impl Into<String>) {
        self.input.search = value.into();
    }

    pub fn set_from_date(&mut self, value: impl Into<String>) {
        self.input.from_date = value.into();
    }

    pub fn set_to_date(&mut self, value: impl Into<String>) {
        self.input.to_date = value.into();
    }

    /// Fetch with the current applied filter (initial load).
    pub fn load(&mut self) -> FetchTicket {
        self.issue()
    }

    /// Copy input to applied and fetch.
    pub fn apply(&mut self) -> FetchTicket {
        self.applied = self.input.clone();
        self.issue()
    }

    /// Clear both layers and fetch unfiltered.
    pub fn reset(&mut self) -> FetchTicket {
        self.input = PrescriptionFilter::default();
        self.applied = PrescriptionFilter::default();
        self.issue()
    }

    /// Report the outcome of a ticket's fetch.
    pub fn complete<E>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Prescription>, E>,
    ) -> Completion<E> {
        if ticket.seq != self.issued {
            debug!(seq = ticket.seq, latest = self.issued, "dropping stale listing response");
            return Completion::Stale;
        }
        self.in_flight = false;
        match result {
            Ok(prescriptions) => {
                let count = prescriptions.len();
                self.prescriptions = prescriptions;
                Completion::Applied(count)
            }
            Err(err) => Completion::Failed(err),
        }
    }

    /// Perform a ticket's fetch against `store` and complete it.
    ///
    /// Failures are reported to `notices`; the displayed list is left as it was.
    pub fn run<S: PrescriptionStore>(
        &mut self,
        store: &S,
        ticket: FetchTicket,
        notices: &mut NoticeQueue,
    ) -> Completion<S::Error> {
        let result = store.list(ticket.filter());
        let completion = self.complete(ticket, result);
        if let Completion::Failed(err) = &completion {
            warn!(error = %err, "listing prescriptions failed");
            notices.push(Notice::from_error(err, "Failed to load prescriptions"));
        }
        completion
    }

    /// Delete `id` in `store`, removing it from the list only once the store confirms.
    pub fn delete<S: PrescriptionStore>(
        &mut self,
        store: &S,
        id: &str,
        notices: &mut NoticeQueue,
    ) -> bool {
        match store.delete(id) {
            Ok(()) => {
                self.prescriptions.retain(|p| p.id != id);
                info!(id, "prescription deleted");
                notices.success("Prescription deleted successfully");
                true
            }
            Err(err) => {
                warn!(id, error = %err, "deleting prescription failed");
                notices.push(Notice::from_error(&err, "Failed to delete prescription"));
                false
            }
        }
    }

    fn issue(&mut self) -> FetchTicket {
        self.issued += 1;
        self.in_flight = true;
        FetchTicket {
            seq: self.issued,
            filter: self.applied.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PatientData, PrescriptionDraft};

    fn prescription(id: &str, name: &str) -> Prescription {
        let mut draft = PrescriptionDraft::default();
        draft.patient_data = PatientData {
            name: name.into(),
            ..PatientData::default()
        };
        Prescription::from_draft(id.into(), None, &draft)
    }

    #[test]
    fn test_query_pairs_skip_empty() {
        let filter = PrescriptionFilter {
            search: "John".into(),
            from_date: "".into(),
            to_date: "2024-02-01".into(),
        };
        assert_eq!(
            filter.query_pairs(),
            vec![("search", "John".to_string()), ("toDate", "2024-02-01".to_string())]
        );
        assert!(PrescriptionFilter::default().is_empty());
        assert!(PrescriptionFilter::search("   ").is_empty());
    }

    #[test]
    fn test_typing_does_not_apply() {
        let mut controller = FilterController::new();
        controller.set_search("John");
        controller.set_from_date("2024-01-01");
        assert_eq!(controller.input().search, "John");
        assert!(controller.applied().is_empty());
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_apply_copies_input() {
        let mut controller = FilterController::new();
        controller.set_search("John");
        let ticket = controller.apply();
        assert_eq!(ticket.filter(), &PrescriptionFilter::search("John"));
        assert_eq!(controller.applied(), controller.input());
        assert!(controller.is_loading());
    }

    #[test]
    fn test_reset_clears_both_layers() {
        let mut controller = FilterController::new();
        controller.set_search("John");
        controller.set_to_date("2024-05-01");
        controller.apply();

        let ticket = controller.reset();
        assert!(ticket.filter().is_empty());
        assert!(controller.input().is_empty());
        assert!(controller.applied().is_empty());
    }

    #[test]
    fn test_stale_completion_dropped() {
        let mut controller = FilterController::new();
        controller.set_search("John");
        let first = controller.apply();
        let second = controller.reset();

        let applied = controller.complete::<()>(second, Ok(vec![prescription("a", "Anyone")]));
        assert!(matches!(applied, Completion::Applied(1)));

        let stale = controller.complete::<()>(first, Ok(vec![]));
        assert!(matches!(stale, Completion::Stale));
        assert_eq!(controller.prescriptions().len(), 1);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_failed_completion_keeps_list() {
        let mut controller = FilterController::new();
        let ticket = controller.load();
        controller.complete::<()>(ticket, Ok(vec![prescription("a", "A")]));

        let ticket = controller.apply();
        let outcome = controller.complete(ticket, Err("offline"));
        assert!(matches!(outcome, Completion::Failed("offline")));
        assert_eq!(controller.prescriptions().len(), 1);
    }
}
