//! Classification of the `/api/status` response body.
//!
//! DESIGN
//! ======
//! Only the exact JSON boolean `true` at `signed-in` counts as signed in.
//! Strings like `"true"`, numbers, and a missing key all count as signed out.
//! A top-level `null` cannot be indexed and is reported as a decode error so
//! the failure policy decides.

#[cfg(test)]
#[path = "status_test.rs"]
mod status_test;

use serde_json::Value;

use crate::error::GuardError;

/// Response key carrying the session flag.
pub const SIGNED_IN_KEY: &str = "signed-in";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignInStatus {
    SignedIn,
    SignedOut,
}

impl SignInStatus {
    /// Classify a decoded status body.
    ///
    /// # Errors
    ///
    /// Returns [`GuardError::Decode`] when the body is JSON `null`.
    pub fn from_body(body: &Value) -> Result<Self, GuardError> {
        if body.is_null() {
            return Err(GuardError::Decode("status body was null".to_owned()));
        }
        // Non-object bodies yield `None` here and fall through to signed out.
        if body.get(SIGNED_IN_KEY) == Some(&Value::Bool(true)) {
            Ok(Self::SignedIn)
        } else {
            Ok(Self::SignedOut)
        }
    }

    #[must_use]
    pub fn is_signed_in(self) -> bool {
        self == Self::SignedIn
    }
}
