//! Authentication session: the bearer token and the signed-in user.

use std::path::Path;

use rxpad_core::db::Database;
use rxpad_core::models::{ClinicianProfile, User};
use tracing::{debug, info};

use crate::ApiResult;

/// Current auth state, optionally persisted so a token survives restarts.
pub struct AuthSession {
    store: Option<Database>,
    token: Option<String>,
    user: Option<User>,
}

impl AuthSession {
    /// Session that lives only as long as this value.
    pub fn ephemeral() -> Self {
        Self {
            store: None,
            token: None,
            user: None,
        }
    }

    /// Open (or create) the session database at `path` and restore any saved session.
    pub fn open<P: AsRef<Path>>(path: P) -> ApiResult<Self> {
        let db = Database::open(&path)?;
        let (token, user) = match db.load_session()? {
            Some(saved) => {
                debug!(path = %path.as_ref().display(), "restored saved session");
                (Some(saved.token), saved.user)
            }
            None => (None, None),
        };
        Ok(Self {
            store: Some(db),
            token,
            user,
        })
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Profile used to brand rendered documents; empty for admins and signed-out sessions.
    pub fn clinician_profile(&self) -> ClinicianProfile {
        self.user
            .as_ref()
            .and_then(User::clinician_profile)
            .unwrap_or_default()
    }

    /// Adopt a freshly issued token.
    pub fn establish(&mut self, token: String, user: User) -> ApiResult<()> {
        if let Some(db) = &self.store {
            db.save_session(&token, Some(&user))?;
        }
        info!(user = %user.email, "session established");
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Replace the cached user, keeping the token.
    pub fn set_user(&mut self, user: User) -> ApiResult<()> {
        if let (Some(db), Some(token)) = (&self.store, &self.token) {
            db.save_session(token, Some(&user))?;
        }
        self.user = Some(user);
        Ok(())
    }

    /// Forget the token and user, in memory and on disk.
    pub fn clear(&mut self) -> ApiResult<()> {
        self.token = None;
        self.user = None;
        if let Some(db) = &self.store {
            if db.clear_session()? {
                info!("session cleared");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rxpad_core::models::{DoctorFields, Role, UserStatus};

    fn doctor() -> User {
        User {
            id: "d1".into(),
            email: "doc@example.com".into(),
            mobile: Some("9000000000".into()),
            status: UserStatus::Active,
            profile_pic: None,
            created_at: None,
            updated_at: None,
            role: Role::Doctor(DoctorFields {
                name: "Meera Iyer".into(),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.db");

        let mut session = AuthSession::open(&path).unwrap();
        assert!(!session.is_authenticated());
        session.establish("tok".into(), doctor()).unwrap();
        drop(session);

        let mut restored = AuthSession::open(&path).unwrap();
        assert_eq!(restored.token(), Some("tok"));
        assert_eq!(restored.clinician_profile().name.as_deref(), Some("Meera Iyer"));

        restored.clear().unwrap();
        drop(restored);
        assert!(!AuthSession::open(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_ephemeral_profile_defaults() {
        let session = AuthSession::ephemeral();
        assert_eq!(session.clinician_profile(), ClinicianProfile::default());
    }
}
