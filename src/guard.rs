//! Sign-in guard decision flow.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per page load: request the status, classify it, and navigate
//! away when the session is signed out. The transport and the navigation
//! side effect sit behind traits so the flow runs the same in the browser
//! and in native tests.
//!
//! ERROR HANDLING
//! ==============
//! Nothing escapes to the embedding page. Transport and decode failures are
//! resolved by [`FailurePolicy`]; the default leaves the page accessible.
//! That fail-open default is a known gap kept for compatibility.

#![allow(async_fn_in_trait)]

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use serde_json::Value;

use crate::config::{FailurePolicy, GuardConfig};
use crate::error::GuardError;
use crate::status::SignInStatus;

/// Performs the single status request and decodes the body as JSON.
///
/// Implementations attach ambient session credentials themselves.
pub trait StatusSource {
    /// # Errors
    ///
    /// Returns [`GuardError::Transport`] if the request cannot complete and
    /// [`GuardError::Decode`] if the body is not JSON.
    async fn fetch_status(&self, path: &str) -> Result<Value, GuardError>;
}

/// Performs a full-page navigation.
pub trait Navigator {
    /// # Errors
    ///
    /// Returns [`GuardError::Navigation`] if the host refuses the navigation.
    fn navigate(&self, target: &str) -> Result<(), GuardError>;
}

/// How a guard run resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Signed in; the page keeps loading.
    Allowed,
    /// Signed out; navigation to the redirect target was issued.
    Redirected,
    /// Status unknown; the page was left alone.
    FailedOpen(GuardError),
    /// Status unknown; navigation was issued anyway.
    FailedClosed(GuardError),
    /// A redirect was required but the host refused it.
    NavigationFailed(GuardError),
}

impl Outcome {
    #[must_use]
    pub fn navigated(&self) -> bool {
        matches!(self, Self::Redirected | Self::FailedClosed(_))
    }
}

/// One-shot guard. `run` consumes it, so each instance performs at most one
/// round trip.
pub struct SignInGuard<S, N> {
    config: GuardConfig,
    source: S,
    navigator: N,
}

impl<S: StatusSource, N: Navigator> SignInGuard<S, N> {
    #[must_use]
    pub fn new(config: GuardConfig, source: S, navigator: N) -> Self {
        Self { config, source, navigator }
    }

    /// Check the session and redirect if it is signed out.
    pub async fn run(self) -> Outcome {
        log::debug!("checking sign-in status at {}", self.config.status_path);
        let status = self
            .source
            .fetch_status(&self.config.status_path)
            .await
            .and_then(|body| SignInStatus::from_body(&body));

        match status {
            Ok(SignInStatus::SignedIn) => Outcome::Allowed,
            Ok(SignInStatus::SignedOut) => {
                log::info!("not signed in; redirecting to {}", self.config.redirect_to);
                self.redirect(Outcome::Redirected)
            }
            Err(e) => match self.config.failure_policy {
                FailurePolicy::Open => {
                    log::warn!("sign-in check failed, leaving page open: {e}");
                    Outcome::FailedOpen(e)
                }
                FailurePolicy::Closed => {
                    log::warn!("sign-in check failed, redirecting to {}: {e}", self.config.redirect_to);
                    self.redirect(Outcome::FailedClosed(e))
                }
            },
        }
    }

    fn redirect(&self, on_success: Outcome) -> Outcome {
        match self.navigator.navigate(&self.config.redirect_to) {
            Ok(()) => on_success,
            Err(e) => {
                log::error!("redirect to {} failed: {e}", self.config.redirect_to);
                Outcome::NavigationFailed(e)
            }
        }
    }
}
