//! Authentication error types

use thiserror::Error;

/// Reasons an authentication attempt did not grant access
///
/// The biometric side produces `HardwareUnavailable`, `ChallengeFailed` and
/// `UserCancelled`. The first two only surface when the PIN fallback is
/// disabled; a cancelled prompt always ends the attempt.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Biometric hardware unavailable or not enrolled")]
    HardwareUnavailable,

    #[error("Biometric challenge failed: {0}")]
    ChallengeFailed(String),

    #[error("Authentication cancelled by user")]
    UserCancelled,

    #[error("Incorrect PIN")]
    PinRejected,

    #[error("PIN entry closed before completion")]
    PinFlowAborted,

    #[error("An authentication request is already pending")]
    RequestInFlight,

    #[error("Invalid auth configuration: {0}")]
    InvalidConfig(String),

    #[error("Crypto error: {0}")]
    Crypto(String),
}
