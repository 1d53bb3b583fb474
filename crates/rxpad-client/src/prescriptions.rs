//! `/api/prescriptions` endpoints.

use reqwest::Method;
use rxpad_core::listing::PrescriptionFilter;
use rxpad_core::models::{Prescription, PrescriptionDraft};
use rxpad_core::store::PrescriptionStore;
use tracing::info;

use crate::{ApiClient, ApiError, ApiResult};

impl PrescriptionStore for ApiClient {
    type Error = ApiError;

    fn list(&self, filter: &PrescriptionFilter) -> ApiResult<Vec<Prescription>> {
        let query = filter.query_pairs();
        self.call_json(Method::GET, &["prescriptions"], |req| req.query(&query))
    }

    fn get(&self, id: &str) -> ApiResult<Prescription> {
        self.call_json(Method::GET, &["prescriptions", id], |req| req)
    }

    fn create(&self, draft: &PrescriptionDraft) -> ApiResult<Prescription> {
        let created: Prescription =
            self.call_json(Method::POST, &["prescriptions"], |req| req.json(draft))?;
        info!(id = %created.id, "prescription created");
        Ok(created)
    }

    fn update(&self, id: &str, draft: &PrescriptionDraft) -> ApiResult<Prescription> {
        let updated: Prescription =
            self.call_json(Method::PUT, &["prescriptions", id], |req| req.json(draft))?;
        info!(id, "prescription updated");
        Ok(updated)
    }

    fn delete(&self, id: &str) -> ApiResult<()> {
        self.call(Method::DELETE, &["prescriptions", id], |req| req)?;
        info!(id, "prescription deleted");
        Ok(())
    }
}
