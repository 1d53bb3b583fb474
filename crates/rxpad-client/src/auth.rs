//! `/api/auth` endpoints.

use std::path::PathBuf;

use reqwest::blocking::multipart::Form;
use reqwest::Method;
use rxpad_core::models::User;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::{ApiClient, ApiError, ApiResult, AuthSession, ResetPasswordError};

/// Minimum length accepted for a new password.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
pub(crate) struct UserEnvelope {
    pub(crate) user: User,
}

/// Registration details.
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub mobile: String,
    pub password: String,
    pub role: SignupRole,
    /// Avatar image to upload
    pub profile_pic: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub enum SignupRole {
    Doctor(DoctorSignup),
    Admin,
}

/// Fields only doctors register with.
#[derive(Debug, Clone, Default)]
pub struct DoctorSignup {
    pub name: String,
    pub address: String,
    pub clinic_hospital_name: String,
    pub qualification: String,
    pub registration_no: String,
    /// Clinic logo printed on prescriptions
    pub logo_pic: Option<PathBuf>,
}

impl SignupForm {
    fn into_multipart(self) -> ApiResult<Form> {
        let role = match &self.role {
            SignupRole::Doctor(_) => "Doctor",
            SignupRole::Admin => "Admin",
        };
        let mut form = Form::new()
            .text("role", role)
            .text("email", self.email)
            .text("mobile", self.mobile)
            .text("password", self.password);

        let mut logo_pic = None;
        if let SignupRole::Doctor(doctor) = self.role {
            form = form
                .text("name", doctor.name)
                .text("address", doctor.address)
                .text("clinicHospitalName", doctor.clinic_hospital_name)
                .text("qualification", doctor.qualification)
                .text("registrationNo", doctor.registration_no);
            logo_pic = doctor.logo_pic;
        }
        if let Some(path) = self.profile_pic {
            form = form.file("profilePic", path)?;
        }
        if let Some(path) = logo_pic {
            form = form.file("logoPic", path)?;
        }
        Ok(form)
    }
}

/// Check a new password pair before sending it.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ResetPasswordError> {
    if password != confirm {
        return Err(ResetPasswordError::Mismatch);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ResetPasswordError::TooShort(MIN_PASSWORD_LEN));
    }
    Ok(())
}

impl ApiClient {
    /// Sign in and persist the issued token.
    pub fn login(&self, email: &str, password: &str) -> ApiResult<User> {
        let response: TokenResponse = self.call_json(Method::POST, &["auth", "login"], |req| {
            req.json(&json!({ "email": email, "password": password }))
        })?;
        self.adopt(response)
    }

    /// Register a new account and sign in as it.
    pub fn signup(&self, form: SignupForm) -> ApiResult<User> {
        let multipart = form.into_multipart()?;
        let response: TokenResponse =
            self.call_json(Method::POST, &["auth", "signup"], |req| req.multipart(multipart))?;
        self.adopt(response)
    }

    /// Fetch the signed-in user and refresh the cached copy.
    pub fn me(&self) -> ApiResult<User> {
        let envelope: UserEnvelope = self.call_json(Method::GET, &["auth", "me"], |req| req)?;
        self.with_session_mut(|session| session.set_user(envelope.user.clone()))?;
        Ok(envelope.user)
    }

    /// Revalidate a stored token at start-up.
    ///
    /// Returns `None` when there is no token or the backend no longer accepts it; in the
    /// latter case the stored token is discarded.
    pub fn restore(&self) -> ApiResult<Option<User>> {
        if !self.session().is_authenticated() {
            return Ok(None);
        }
        match self.me() {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Unauthorized { .. }) => Ok(None),
            Err(ApiError::Status { status, .. }) => {
                warn!(status, "stored session rejected, signing out");
                self.logout()?;
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn logout(&self) -> ApiResult<()> {
        self.with_session_mut(AuthSession::clear)
    }

    /// Ask the backend to email a reset link.
    pub fn forgot_password(&self, email: &str) -> ApiResult<()> {
        self.call(Method::POST, &["auth", "forgot-password"], |req| {
            req.json(&json!({ "email": email }))
        })?;
        info!("password reset requested");
        Ok(())
    }

    /// Set a new password using the token from a reset link.
    pub fn reset_password(&self, token: &str, password: &str, confirm: &str) -> ApiResult<()> {
        validate_new_password(password, confirm)?;
        self.call(Method::POST, &["auth", "reset-password", token], |req| {
            req.json(&json!({ "password": password }))
        })?;
        info!("password reset");
        Ok(())
    }

    fn adopt(&self, response: TokenResponse) -> ApiResult<User> {
        let TokenResponse { token, user } = response;
        self.with_session_mut(|session| session.establish(token, user.clone()))?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_rules() {
        assert_eq!(
            validate_new_password("secret1", "secret2"),
            Err(ResetPasswordError::Mismatch)
        );
        assert_eq!(
            validate_new_password("abc", "abc"),
            Err(ResetPasswordError::TooShort(6))
        );
        assert!(validate_new_password("abcdef", "abcdef").is_ok());
    }

    #[test]
    fn test_missing_upload_is_an_error() {
        let form = SignupForm {
            email: "a@example.com".into(),
            mobile: "9000000000".into(),
            password: "secret".into(),
            role: SignupRole::Admin,
            profile_pic: Some(PathBuf::from("/definitely/not/here.png")),
        };
        assert!(matches!(form.into_multipart(), Err(ApiError::Io(_))));
    }
}
