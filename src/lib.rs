//! # signin-guard
//!
//! Page guard that asks the server whether the browser session is signed in
//! and sends the user to the home page when it is not.
//!
//! SYSTEM CONTEXT
//! ==============
//! Embedded as a WASM module on pages that require an authenticated session.
//! The server answering `/api/status` owns sessions and cookies; this crate
//! only reads the `signed-in` flag and navigates.
//!
//! `guard` holds the decision flow behind two seams (`StatusSource`,
//! `Navigator`), `net` holds the transports, and `browser` wires the
//! browser implementations to a `wasm-bindgen` start function.

pub mod config;
pub mod error;
pub mod guard;
pub mod net;
pub mod status;

#[cfg(feature = "hydrate")]
pub mod browser;

pub use config::{FailurePolicy, GuardConfig};
pub use error::GuardError;
pub use guard::{Navigator, Outcome, SignInGuard, StatusSource};
pub use status::SignInStatus;
