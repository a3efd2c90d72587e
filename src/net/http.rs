//! Native status transport over `reqwest`.
//!
//! Outside the browser there are no ambient cookies, so the session cookie
//! is handed to the source explicitly and sent on every request.

use reqwest::header::{ACCEPT, COOKIE};
use serde_json::Value;

use crate::config::GuardConfig;
use crate::error::GuardError;
use crate::guard::StatusSource;
use crate::net::ACCEPT_JSON;
use crate::status::SignInStatus;

#[derive(Clone, Debug)]
pub struct HttpStatusSource {
    client: reqwest::Client,
    base_url: String,
    cookie: Option<String>,
}

impl HttpStatusSource {
    /// Build a source for the server at `base_url` (scheme and host, e.g.
    /// `http://localhost:3000`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { client: reqwest::Client::new(), base_url, cookie: None }
    }

    /// Use a preconfigured client (timeouts, proxies, TLS roots).
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Attach a `Cookie` header value carrying the session.
    #[must_use]
    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }

    /// Absolute URL for a status path.
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Fetch and classify in one step, for smoke checks that do not need a
    /// navigator.
    ///
    /// # Errors
    ///
    /// Returns a transport or decode error from the underlying request.
    pub async fn check(&self, config: &GuardConfig) -> Result<SignInStatus, GuardError> {
        let body = self.fetch_status(&config.status_path).await?;
        SignInStatus::from_body(&body)
    }
}

impl StatusSource for HttpStatusSource {
    async fn fetch_status(&self, path: &str) -> Result<Value, GuardError> {
        let url = self.url_for(path);
        let mut request = self.client.get(&url).header(ACCEPT, ACCEPT_JSON);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie);
        }
        let resp = request.send().await.map_err(|e| GuardError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            log::debug!("{url} answered {status}; classifying body anyway");
        }
        let bytes = resp.bytes().await.map_err(|e| GuardError::Transport(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| GuardError::Decode(e.to_string()))
    }
}
