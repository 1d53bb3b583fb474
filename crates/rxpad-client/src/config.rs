//! Client configuration.
//!
//! Resolved once at process start-up and passed into [`ApiClient`](crate::ApiClient).
//! Nothing in the client reads environment variables after that.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;

use crate::{ApiError, ApiResult};

pub const API_BASE_URL_VAR: &str = "RXPAD_API_BASE_URL";
pub const HTTP_TIMEOUT_VAR: &str = "RXPAD_HTTP_TIMEOUT_SECS";
pub const SESSION_DB_VAR: &str = "RXPAD_SESSION_DB";

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_DB: &str = "rxpad.db";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_base_url: String,
    timeout: Duration,
    session_db: PathBuf,
}

impl ClientConfig {
    /// Create a new `ClientConfig`. A trailing `/` on the base URL is dropped.
    pub fn new(api_base_url: &str, timeout: Duration, session_db: PathBuf) -> ApiResult<Self> {
        let api_base_url = api_base_url.trim().trim_end_matches('/');
        if api_base_url.is_empty() {
            return Err(ApiError::InvalidConfig("API base URL cannot be empty".into()));
        }
        if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
            return Err(ApiError::InvalidConfig(format!(
                "API base URL must start with http:// or https://, got {api_base_url:?}"
            )));
        }
        Url::parse(api_base_url).map_err(|err| {
            ApiError::InvalidConfig(format!("API base URL {api_base_url:?} is not a URL: {err}"))
        })?;
        if timeout.is_zero() {
            return Err(ApiError::InvalidConfig("HTTP timeout must be positive".into()));
        }

        Ok(Self {
            api_base_url: api_base_url.to_string(),
            timeout,
            session_db,
        })
    }

    /// Load `.env` if present, then read the `RXPAD_*` variables.
    pub fn from_env() -> ApiResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup, applying defaults for absent keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ApiResult<Self> {
        let base_url =
            lookup(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let timeout_secs = match lookup(HTTP_TIMEOUT_VAR) {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ApiError::InvalidConfig(format!("{HTTP_TIMEOUT_VAR} must be a whole number of seconds, got {raw:?}"))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let session_db = lookup(SESSION_DB_VAR)
            .filter(|path| !path.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SESSION_DB.to_string());

        Self::new(
            &base_url,
            Duration::from_secs(timeout_secs),
            PathBuf::from(session_db),
        )
    }

    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn session_db(&self) -> &Path {
        &self.session_db
    }

    /// Full URL of an `/api` endpoint, e.g. `endpoint(&["prescriptions", id])`.
    ///
    /// Each segment is percent-encoded, so ids and tokens cannot add path levels or a
    /// query string.
    pub fn endpoint(&self, segments: &[&str]) -> ApiResult<Url> {
        let mut url = Url::parse(&self.api_base_url)
            .map_err(|err| ApiError::InvalidConfig(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidConfig("API base URL cannot carry a path".into()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url(), DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.session_db(), Path::new("rxpad.db"));
        assert_eq!(
            config.endpoint(&["auth", "me"]).unwrap().as_str(),
            "http://localhost:5000/api/auth/me"
        );
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_BASE_URL_VAR, "https://rx.example.com/"),
            (HTTP_TIMEOUT_VAR, "5"),
            (SESSION_DB_VAR, "/tmp/session.db"),
        ]))
        .unwrap();
        assert_eq!(
            config.endpoint(&["prescriptions"]).unwrap().as_str(),
            "https://rx.example.com/api/prescriptions"
        );
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.session_db(), Path::new("/tmp/session.db"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(API_BASE_URL_VAR, "  ")])),
            Err(ApiError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(API_BASE_URL_VAR, "ftp://host")])),
            Err(ApiError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "0")])),
            Err(ApiError::InvalidConfig(_))
        ));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&[(HTTP_TIMEOUT_VAR, "soon")])),
            Err(ApiError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let config = ClientConfig::from_lookup(lookup(&[(API_BASE_URL_VAR, "https://rx.example.com/clinic/")]))
            .unwrap();
        let url = config.endpoint(&["auth", "reset-password", "a/b?c=d#e"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://rx.example.com/clinic/api/auth/reset-password/a%2Fb%3Fc=d%23e"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.path_segments().unwrap().count(), 5);
    }
}
