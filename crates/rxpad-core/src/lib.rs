//! Rxpad Core Library
//!
//! Drafting, rendering and listing of clinical prescriptions.
//!
//! # Architecture
//!
//! ```text
//!   edit draft ──► render() ──► Document ──┬──► preview
//!       │                                  ├──► print  ┐
//!       │                                  └──► PDF    ┴─► DocumentSink
//!       ▼
//!   PrescriptionStore (REST client or LocalStore)
//!       ▲
//!       │ list(applied filter)
//!   FilterController ◄── apply / reset
//! ```
//!
//! The host owns a [`PrescriptionDesk`] (or the pieces separately) and calls into it from
//! its event loop. No component locks or spawns; every backend call is a single request.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientData, MedicineEntry, Prescription, User, etc.)
//! - [`editor`]: Draft mutation and the medicines sub-list editor
//! - [`render`]: Document rendering with date formatting and clinician defaults
//! - [`export`]: Print and PDF jobs handed to a [`DocumentSink`](export::DocumentSink)
//! - [`listing`]: Filter controller with stale-response protection, and the pager
//! - [`store`]: The [`PrescriptionStore`] persistence contract
//! - [`db`]: SQLite local store and persisted session
//! - [`notice`]: User-visible notifications

pub mod db;
pub mod desk;
pub mod editor;
pub mod export;
pub mod listing;
pub mod models;
pub mod notice;
pub mod render;
pub mod store;

// Re-export commonly used types
pub use db::{Database, LocalStore};
pub use desk::PrescriptionDesk;
pub use editor::{DraftError, EditorError, MedicinesEditor};
pub use export::{DocumentSink, ExportJob, OutputTarget, PdfOptions};
pub use listing::{Completion, FetchTicket, FilterController, Pager, PrescriptionFilter};
pub use models::{
    ClinicianProfile, Gender, MedicineEntry, MedicineField, Page, PageRequest, PatientData,
    PatientField, Pagination, Prescription, PrescriptionDraft, Role, User, UserStatus,
};
pub use notice::{Notice, NoticeLevel, NoticeQueue, UserFacing};
pub use render::{render, render_with, Document, RenderDefaults};
pub use store::PrescriptionStore;
