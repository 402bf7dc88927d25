//! Authentication events
//!
//! Broadcast by the gate and the PIN modal so a front-end can redraw without
//! polling. Nobody listening is not an error.

use serde::Serialize;

use crate::biometric::AuthOutcome;
use crate::error::AuthError;
use crate::gate::AuthMethod;

/// Capacity of the event channel
pub(crate) const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    /// Biometric prompt finished
    BiometricChallenged { outcome: AuthOutcome },
    /// PIN keypad shown
    PinModalOpened,
    /// A full PIN was rejected
    PinRejected { message: String },
    /// PIN keypad hidden
    PinModalClosed { accepted: bool },
    /// Session became authenticated
    Authenticated { method: AuthMethod },
    /// Reveal flag changed
    RevealChanged { revealed: bool },
    /// Attempt ended without access
    Denied {
        #[serde(serialize_with = "serialize_error")]
        reason: AuthError,
    },
}

fn serialize_error<S>(error: &AuthError, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.collect_str(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_tagged() {
        let json = serde_json::to_string(&AuthEvent::RevealChanged { revealed: true }).unwrap();
        assert_eq!(json, r#"{"type":"reveal_changed","revealed":true}"#);

        let json = serde_json::to_string(&AuthEvent::Denied {
            reason: AuthError::UserCancelled,
        })
        .unwrap();
        assert!(json.contains("Authentication cancelled by user"));
    }
}
