//! Error type shared by the guard and its transports.

/// Failure while checking or acting on the signed-in status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    #[error("status request failed: {0}")]
    Transport(String),
    #[error("status body could not be decoded: {0}")]
    Decode(String),
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("invalid guard config: {0}")]
    Config(String),
}
