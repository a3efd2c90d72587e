//! Guard configuration.
//!
//! DESIGN
//! ======
//! Defaults reproduce the embedded page snippet: check `/api/status`,
//! redirect to `/`, fail open. A page may pass a JSON object with any
//! subset of kebab-case keys to override them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::GuardError;

/// Path of the status endpoint queried on page load.
pub const DEFAULT_STATUS_PATH: &str = "/api/status";

/// Where signed-out users are sent.
pub const DEFAULT_REDIRECT_TO: &str = "/";

/// What to do when the status request or body decode fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Leave the page alone. Matches the historical behavior.
    #[default]
    Open,
    /// Treat an unreadable status as signed out and redirect.
    Closed,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GuardConfig {
    pub status_path: String,
    pub redirect_to: String,
    pub failure_policy: FailurePolicy,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            status_path: DEFAULT_STATUS_PATH.to_owned(),
            redirect_to: DEFAULT_REDIRECT_TO.to_owned(),
            failure_policy: FailurePolicy::Open,
        }
    }
}

impl GuardConfig {
    /// Parse a JSON config object. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Config`] for malformed JSON, unknown keys, or an
    /// empty path.
    pub fn from_json(raw: &str) -> Result<Self, GuardError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| GuardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Config from the content of a page's `signin-guard` meta tag.
    ///
    /// No tag means defaults. A malformed tag is logged and also yields
    /// defaults.
    #[must_use]
    pub fn from_page_meta(content: Option<&str>) -> Self {
        let Some(raw) = content else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::error!("ignoring signin-guard meta tag: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn with_status_path(mut self, path: impl Into<String>) -> Self {
        self.status_path = path.into();
        self
    }

    #[must_use]
    pub fn with_redirect_to(mut self, target: impl Into<String>) -> Self {
        self.redirect_to = target.into();
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    fn validate(&self) -> Result<(), GuardError> {
        if self.status_path.trim().is_empty() {
            return Err(GuardError::Config("status-path must not be empty".to_owned()));
        }
        if self.redirect_to.trim().is_empty() {
            return Err(GuardError::Config("redirect-to must not be empty".to_owned()));
        }
        Ok(())
    }
}
