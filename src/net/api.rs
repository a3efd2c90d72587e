//! Browser status transport.
//!
//! Client-side (hydrate): a real `fetch` via `gloo-net`, with the page's
//! session cookies attached through `credentials: same-origin`.
//! Elsewhere: a stub that reports a transport error, so a guard built with
//! it outside the browser fails according to its policy.
//!
//! ERROR HANDLING
//! ==============
//! The HTTP status is logged but not acted on. A non-2xx response with a
//! JSON body is classified by that body; a non-JSON body is a decode error.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde_json::Value;

use crate::error::GuardError;
use crate::guard::StatusSource;

#[cfg(any(test, feature = "hydrate"))]
fn unexpected_status_message(path: &str, status: u16) -> String {
    format!("{path} answered {status}; classifying body anyway")
}

/// `GET` for the status path with JSON accept and the page's own cookies.
#[cfg(feature = "hydrate")]
pub(crate) fn status_request(path: &str) -> Result<gloo_net::http::Request, GuardError> {
    gloo_net::http::Request::get(path)
        .header("Accept", super::ACCEPT_JSON)
        .credentials(web_sys::RequestCredentials::SameOrigin)
        .build()
        .map_err(|e| GuardError::Transport(e.to_string()))
}

/// Fetches the status endpoint from the current page's origin.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStatusSource;

impl StatusSource for BrowserStatusSource {
    async fn fetch_status(&self, path: &str) -> Result<Value, GuardError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = status_request(path)?
                .send()
                .await
                .map_err(|e| GuardError::Transport(e.to_string()))?;
            if !(200..300).contains(&resp.status()) {
                log::debug!("{}", unexpected_status_message(path, resp.status()));
            }
            resp.json::<Value>().await.map_err(|e| GuardError::Decode(e.to_string()))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(GuardError::Transport(format!("{path}: browser fetch not available")))
        }
    }
}
