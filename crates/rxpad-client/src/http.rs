//! HTTP transport shared by every endpoint group.

use std::cell::{Ref, RefCell};

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::backend_message;
use crate::{ApiError, ApiResult, AuthSession, ClientConfig};

/// Blocking client for the `/api` backend.
///
/// Every call is a single request; nothing is retried. A `401` for a request that carried
/// the session token clears the session before the error is returned. Credential exchanges
/// (login, signup) never carry the token, so a rejected password leaves an existing
/// session alone.
pub struct ApiClient {
    http: Client,
    config: ClientConfig,
    session: RefCell<AuthSession>,
}

impl ApiClient {
    /// Client with the session persisted at the configured path.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let session = AuthSession::open(config.session_db())?;
        Self::with_session(config, session)
    }

    pub fn with_session(config: ClientConfig, session: AuthSession) -> ApiResult<Self> {
        let http = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            config,
            session: RefCell::new(session),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> Ref<'_, AuthSession> {
        self.session.borrow()
    }

    pub(crate) fn with_session_mut<R>(&self, f: impl FnOnce(&mut AuthSession) -> R) -> R {
        f(&mut self.session.borrow_mut())
    }

    /// Issue a request to `/api/<segments...>` and return the body of a successful response.
    pub(crate) fn call(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<String> {
        let url = self.config.endpoint(segments)?;
        let path = url.path().to_string();
        let mut request = self.http.request(method.clone(), url);
        let mut sent_token = false;
        if !is_credential_exchange(segments) {
            if let Some(token) = self.session.borrow().token() {
                request = request.bearer_auth(token);
                sent_token = true;
            }
        }

        let response = build(request).send()?;
        let status = response.status();
        let body = response.text()?;
        debug!(%method, path, status = status.as_u16(), "api request");

        if status.is_success() {
            return Ok(body);
        }

        let message = backend_message(&body);
        if status == StatusCode::UNAUTHORIZED {
            if sent_token {
                warn!(path, "backend rejected session token, clearing session");
                self.with_session_mut(AuthSession::clear)?;
            }
            return Err(ApiError::Unauthorized { message });
        }
        Err(ApiError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// [`call`](Self::call) and decode the JSON body.
    pub(crate) fn call_json<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> ApiResult<T> {
        let body = self.call(method, segments, build)?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn is_credential_exchange(segments: &[&str]) -> bool {
    matches!(segments, ["auth", "login"] | ["auth", "signup"])
}
