//! txguard Auth - Authentication gate for revealing sensitive values
//!
//! ALL reveal decisions go through [`AuthGate`]. It owns the process-wide
//! session (authenticated / revealed) and arbitrates between two factors:
//!
//! 1. A biometric challenge through the platform ([`BiometricProbe`])
//! 2. A PIN keypad fallback ([`PinModal`] driving a [`PinKeypad`])
//!
//! # Security Model
//!
//! - Biometric platform errors are normalized at the probe; the gate never
//!   sees a raw platform failure
//! - A user-cancelled biometric prompt does not fall back to PIN
//! - PIN digits live in zeroizing buffers and are verified against an
//!   Argon2id hash
//! - Authentication is one-way for the life of the gate: there is no re-lock
//! - PIN retries are unbounded; there is no lockout or backoff

pub mod biometric;
pub mod config;
pub mod error;
pub mod events;
pub mod feedback;
pub mod gate;
pub mod keypad;
pub mod modal;
pub mod pending;
pub mod session;
pub mod validator;

pub use biometric::{
    AuthOutcome, Availability, BiometricPlatform, BiometricProbe, NoBiometrics, PlatformError,
    PromptOptions, PromptResult, SimulatedBiometrics, USER_CANCEL,
};
pub use config::{AuthConfig, MAX_PIN_LENGTH, MIN_PIN_LENGTH};
pub use error::AuthError;
pub use events::AuthEvent;
pub use feedback::{ErrorSignal, SilentSignal, ERROR_VIBRATION_PATTERN};
pub use gate::{AuthGate, AuthMethod};
pub use keypad::{KeyPress, KeypadPhase, PinKeypad, Submission, Verdict, INCORRECT_PIN_MESSAGE};
pub use modal::{PinEntryState, PinModal};
pub use pending::{PendingRequest, PinResolution};
pub use session::{AuthSession, SessionSnapshot};
pub use validator::{Argon2PinValidator, PinValidator, DEMO_PIN, DEMO_VALIDATION_DELAY};
