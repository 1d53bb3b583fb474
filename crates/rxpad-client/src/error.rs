//! Client errors.

use rxpad_core::db::DbError;
use rxpad_core::notice::UserFacing;
use thiserror::Error;

/// Password reset input rejected before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResetPasswordError {
    #[error("Passwords do not match")]
    Mismatch,

    #[error("Password must be at least {0} characters long")]
    TooShort(usize),
}

/// REST client errors.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Backend returned {status}{}", detail(.message))]
    Status { status: u16, message: Option<String> },

    #[error("Not authenticated")]
    Unauthorized { message: Option<String> },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage error: {0}")]
    Session(#[from] DbError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    ResetPassword(#[from] ResetPasswordError),
}

impl UserFacing for ApiError {
    fn user_message(&self) -> Option<String> {
        match self {
            ApiError::Status { message, .. } | ApiError::Unauthorized { message } => {
                message.clone()
            }
            ApiError::ResetPassword(err) => Some(err.to_string()),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

fn detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Pull a human-readable message out of an error body (`{"error": ..}` or `{"message": ..}`).
pub(crate) fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .filter_map(|key| value.get(*key)?.as_str())
        .map(str::trim)
        .find(|msg| !msg.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_prefers_error() {
        assert_eq!(
            backend_message(r#"{"error": "Email taken", "message": "Bad request"}"#).as_deref(),
            Some("Email taken")
        );
        assert_eq!(
            backend_message(r#"{"message": "Invalid token"}"#).as_deref(),
            Some("Invalid token")
        );
        assert_eq!(backend_message(r#"{"error": "  "}"#), None);
        assert_eq!(backend_message("<html>502</html>"), None);
    }

    #[test]
    fn test_user_message() {
        let err = ApiError::Status {
            status: 404,
            message: Some("Prescription not found".into()),
        };
        assert_eq!(err.user_message().as_deref(), Some("Prescription not found"));
        assert_eq!(err.to_string(), "Backend returned 404: Prescription not found");

        let bare = ApiError::Status { status: 500, message: None };
        assert_eq!(bare.user_message(), None);
        assert_eq!(bare.to_string(), "Backend returned 500");

        let short: ApiError = ResetPasswordError::TooShort(6).into();
        assert_eq!(
            short.user_message().as_deref(),
            Some("Password must be at least 6 characters long")
        );
    }
}
