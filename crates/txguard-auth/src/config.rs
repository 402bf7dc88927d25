//! Authentication configuration

use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Minimum configurable PIN length
pub const MIN_PIN_LENGTH: usize = 4;
/// Maximum configurable PIN length
pub const MAX_PIN_LENGTH: usize = 12;

/// Gate configuration options
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Fixed number of digits the keypad collects before validating
    #[serde(default = "default_pin_length")]
    pub pin_length: usize,

    /// Message shown by the platform biometric prompt
    #[serde(default = "default_prompt_message")]
    pub prompt_message: String,

    /// Label of the platform prompt's fallback button
    #[serde(default = "default_fallback_label")]
    pub fallback_label: String,

    /// Let the platform offer its own device passcode inside the prompt
    #[serde(default)]
    pub disable_device_fallback: bool,

    /// Open the PIN keypad when biometrics fail or are unavailable
    #[serde(default = "default_fallback_to_pin")]
    pub fallback_to_pin: bool,
}

fn default_pin_length() -> usize {
    6
}

fn default_prompt_message() -> String {
    "Login with Biometrics".to_string()
}

fn default_fallback_label() -> String {
    "Use PIN".to_string()
}

fn default_fallback_to_pin() -> bool {
    true
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            pin_length: default_pin_length(),
            prompt_message: default_prompt_message(),
            fallback_label: default_fallback_label(),
            disable_device_fallback: false,
            fallback_to_pin: default_fallback_to_pin(),
        }
    }
}

impl AuthConfig {
    /// Biometrics only; failures are final
    pub fn biometric_only() -> Self {
        Self {
            fallback_to_pin: false,
            ..Self::default()
        }
    }

    /// Check the configuration before building a gate
    pub fn validate(&self) -> Result<(), AuthError> {
        if !(MIN_PIN_LENGTH..=MAX_PIN_LENGTH).contains(&self.pin_length) {
            return Err(AuthError::InvalidConfig(format!(
                "pin_length must be {}-{}, got {}",
                MIN_PIN_LENGTH, MAX_PIN_LENGTH, self.pin_length
            )));
        }

        if self.prompt_message.trim().is_empty() {
            return Err(AuthError::InvalidConfig(
                "prompt_message must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AuthConfig::default();
        assert_eq!(config.pin_length, 6);
        assert_eq!(config.fallback_label, "Use PIN");
        assert!(config.fallback_to_pin);
        assert!(!config.disable_device_fallback);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pin_length_bounds() {
        let short = AuthConfig {
            pin_length: 3,
            ..AuthConfig::default()
        };
        assert!(matches!(short.validate(), Err(AuthError::InvalidConfig(_))));

        let long = AuthConfig {
            pin_length: 13,
            ..AuthConfig::default()
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AuthConfig = serde_json::from_str(r#"{"pin_length": 8}"#).unwrap();
        assert_eq!(config.pin_length, 8);
        assert_eq!(config.prompt_message, "Login with Biometrics");
        assert!(config.fallback_to_pin);
    }
}
