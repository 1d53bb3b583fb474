//! Persisted auth session: the bearer token and the last fetched user.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbResult};
use crate::models::User;

/// A session as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSession {
    pub token: String,
    pub user: Option<User>,
}

impl Database {
    /// Store the session, replacing any previous one.
    pub fn save_session(&self, token: &str, user: Option<&User>) -> DbResult<()> {
        let user_json = user.map(serde_json::to_string).transpose()?;
        self.conn.execute(
            r#"
            INSERT INTO session (id, token, user, saved_at)
            VALUES (1, ?1, ?2, datetime('now'))
            ON CONFLICT(id) DO UPDATE SET
                token = excluded.token,
                user = excluded.user,
                saved_at = excluded.saved_at
            "#,
            params![token, user_json],
        )?;
        Ok(())
    }

    /// Load the stored session, if any.
    pub fn load_session(&self) -> DbResult<Option<StoredSession>> {
        let row: Option<(String, Option<String>)> = self
            .conn
            .query_row("SELECT token, user FROM session WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .optional()?;

        row.map(|(token, user_json)| -> DbResult<StoredSession> {
            let user: Option<User> = user_json
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;
            Ok(StoredSession { token, user })
        })
        .transpose()
    }

    /// Forget the stored session. Returns whether one existed.
    pub fn clear_session(&self) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM session", [])?;
        Ok(rows_affected > 0)
    }
}
