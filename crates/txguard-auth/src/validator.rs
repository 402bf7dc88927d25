//! PIN validation
//!
//! The keypad only knows the [`PinValidator`] trait. The shipped
//! implementation verifies against an Argon2id PHC hash; the demo build
//! hashes a fixed PIN at startup.

use std::time::Duration;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use tracing::{debug, error};
use zeroize::Zeroizing;

use crate::config::{MAX_PIN_LENGTH, MIN_PIN_LENGTH};
use crate::error::AuthError;

/// PIN accepted by the demo validator
pub const DEMO_PIN: &str = "123456";

/// Artificial latency of the demo validator
pub const DEMO_VALIDATION_DELAY: Duration = Duration::from_millis(800);

/// Asynchronous PIN check
#[async_trait]
pub trait PinValidator: Send + Sync {
    /// Whether `pin` is correct. Errors count as a rejection.
    async fn validate(&self, pin: &str) -> bool;
}

/// Verifies PINs against a stored Argon2id hash
#[derive(Clone)]
pub struct Argon2PinValidator {
    hash: String,
    delay: Duration,
}

impl Argon2PinValidator {
    /// Hash `pin` with a fresh salt
    pub fn from_pin(pin: &str) -> Result<Self, AuthError> {
        validate_pin_format(pin)?;

        let salt = SaltString::generate(&mut OsRng);
        let pin_bytes = Zeroizing::new(pin.as_bytes().to_vec());
        let hash = Argon2::default()
            .hash_password(&pin_bytes, &salt)
            .map_err(|e| AuthError::Crypto(format!("Failed to hash PIN: {}", e)))?
            .to_string();

        Ok(Self {
            hash,
            delay: Duration::ZERO,
        })
    }

    /// Use an existing PHC hash string
    pub fn from_phc(hash: impl Into<String>) -> Result<Self, AuthError> {
        let hash = hash.into();
        PasswordHash::new(&hash)
            .map_err(|e| AuthError::Crypto(format!("Invalid stored hash: {}", e)))?;

        Ok(Self {
            hash,
            delay: Duration::ZERO,
        })
    }

    /// Demo validator: accepts [`DEMO_PIN`] after [`DEMO_VALIDATION_DELAY`]
    pub fn demo() -> Result<Self, AuthError> {
        Ok(Self::from_pin(DEMO_PIN)?.with_delay(DEMO_VALIDATION_DELAY))
    }

    /// Add latency before every verification
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// PHC string of the stored hash
    pub fn phc(&self) -> &str {
        &self.hash
    }

    /// Synchronous constant-time verification
    pub fn verify(&self, pin: &str) -> Result<(), AuthError> {
        verify_against(&self.hash, pin.as_bytes())
    }
}

impl std::fmt::Debug for Argon2PinValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argon2PinValidator")
            .field("delay", &self.delay)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PinValidator for Argon2PinValidator {
    async fn validate(&self, pin: &str) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let hash = self.hash.clone();
        let pin_bytes = Zeroizing::new(pin.as_bytes().to_vec());

        match tokio::task::spawn_blocking(move || verify_against(&hash, &pin_bytes)).await {
            Ok(Ok(())) => true,
            Ok(Err(AuthError::PinRejected)) => {
                debug!("PIN did not match stored hash");
                false
            }
            Ok(Err(e)) => {
                error!("PIN verification error: {}", e);
                false
            }
            Err(e) => {
                error!("PIN verification task failed: {}", e);
                false
            }
        }
    }
}

fn verify_against(hash: &str, pin: &[u8]) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AuthError::Crypto(format!("Invalid stored hash: {}", e)))?;

    Argon2::default()
        .verify_password(pin, &parsed)
        .map_err(|_| AuthError::PinRejected)
}

fn validate_pin_format(pin: &str) -> Result<(), AuthError> {
    if !(MIN_PIN_LENGTH..=MAX_PIN_LENGTH).contains(&pin.len()) {
        return Err(AuthError::InvalidConfig(format!(
            "PIN must be {}-{} digits",
            MIN_PIN_LENGTH, MAX_PIN_LENGTH
        )));
    }

    if !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(AuthError::InvalidConfig(
            "PIN must contain only digits".to_string(),
        ));
    }

    Ok(())
}
