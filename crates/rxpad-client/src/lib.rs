//! Blocking REST client for the rxpad backend.
//!
//! [`ApiClient`] implements [`PrescriptionStore`](rxpad_core::store::PrescriptionStore)
//! against `/api/prescriptions` and adds the auth and admin endpoints. Configuration comes
//! from [`ClientConfig`]; the bearer token lives in an [`AuthSession`] that can be
//! persisted to the core SQLite database.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
mod http;
mod prescriptions;
pub mod session;

pub use admin::{RoleFilter, UserQuery, UserUpdate};
pub use auth::{validate_new_password, DoctorSignup, SignupForm, SignupRole};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult, ResetPasswordError};
pub use http::ApiClient;
pub use session::AuthSession;
