//! Status transports.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the status endpoint from the browser via `gloo-net`;
//! `http` does the same from native code via `reqwest`. Both send the same
//! request shape and leave the status code uninspected.

pub mod api;
#[cfg(feature = "native")]
pub mod http;

/// Media type requested from the status endpoint.
pub const ACCEPT_JSON: &str = "application/json";
