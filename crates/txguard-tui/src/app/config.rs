//! TUI configuration persistence
//!
//! Saves and loads the viewer's settings: auth gate options, which biometric
//! platform to use, the PIN hash and the mock data source knobs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use txguard_auth::{
    Argon2PinValidator, AuthConfig, AuthError, BiometricPlatform, NoBiometrics, PlatformError,
    SimulatedBiometrics, DEMO_PIN, DEMO_VALIDATION_DELAY,
};
use txguard_core::MockSourceConfig;
use zeroize::Zeroizing;

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Configuration directory under ~/.config
const CONFIG_DIR_NAME: &str = "txguard";

/// Which biometric platform backs the gate
///
/// Terminals have no sensor, so anything other than `no-sensor` is simulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BiometricMode {
    /// No sensor: always falls back to PIN
    #[default]
    NoSensor,
    /// Enrolled sensor that always verifies
    SimulatedSuccess,
    /// Enrolled sensor that never matches
    SimulatedFailure,
    /// User dismisses every prompt
    SimulatedCancel,
    /// Sensor present, nothing enrolled
    SimulatedUnenrolled,
    /// Sensor that errors out
    SimulatedError,
}

impl BiometricMode {
    pub fn platform(self) -> Arc<dyn BiometricPlatform> {
        match self {
            BiometricMode::NoSensor => Arc::new(NoBiometrics),
            BiometricMode::SimulatedSuccess => Arc::new(SimulatedBiometrics::succeeding()),
            BiometricMode::SimulatedFailure => Arc::new(SimulatedBiometrics::failing()),
            BiometricMode::SimulatedCancel => Arc::new(SimulatedBiometrics::cancelling()),
            BiometricMode::SimulatedUnenrolled => Arc::new(SimulatedBiometrics::unenrolled()),
            BiometricMode::SimulatedError => Arc::new(SimulatedBiometrics::new(
                true,
                Err(PlatformError::ServiceUnavailable("simulated".to_string())),
            )),
        }
    }
}

/// TUI configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Auth gate options
    #[serde(default)]
    pub auth: AuthConfig,

    /// Biometric platform selection
    #[serde(default)]
    pub biometrics: BiometricMode,

    /// Argon2id PHC hash of the PIN; the demo PIN is used when absent
    #[serde(default)]
    pub pin_hash: Option<String>,

    /// Artificial latency before each PIN check
    #[serde(default = "default_validation_delay_ms")]
    pub validation_delay_ms: u64,

    /// Mock data source options
    #[serde(default)]
    pub data: MockSourceConfig,

    /// Log file; defaults to `txguard.log` in the config directory
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_validation_delay_ms() -> u64 {
    DEMO_VALIDATION_DELAY.as_millis() as u64
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            auth: AuthConfig::default(),
            biometrics: BiometricMode::default(),
            pin_hash: None,
            validation_delay_ms: default_validation_delay_ms(),
            data: MockSourceConfig::default(),
            log_file: None,
        }
    }
}

impl TuiConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        // Try XDG_CONFIG_HOME first, then fall back to ~/.config
        if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
            return Some(PathBuf::from(xdg_config).join(CONFIG_DIR_NAME));
        }

        dirs::config_dir().map(|p| p.join(CONFIG_DIR_NAME))
    }

    /// Get the full config file path
    pub fn config_file_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(CONFIG_FILE_NAME))
    }

    /// Default log file location
    pub fn default_log_file() -> PathBuf {
        Self::config_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("txguard.log")
    }

    /// Load configuration from the default location
    ///
    /// Returns default configuration if file doesn't exist or can't be parsed.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Failed to parse config file: {}", e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| ConfigError::Io(e.to_string()))?;
            }
        }

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        fs::write(path, contents).map_err(|e| ConfigError::Io(e.to_string()))?;

        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// Replace the PIN with a fresh Argon2id hash of `pin`
    pub fn set_pin(&mut self, pin: &str) -> Result<(), ConfigError> {
        if pin.chars().count() != self.auth.pin_length {
            return Err(ConfigError::Invalid(format!(
                "PIN must be {} digits",
                self.auth.pin_length
            )));
        }
        let validator = Argon2PinValidator::from_pin(pin)?;
        self.pin_hash = Some(validator.phc().to_string());
        Ok(())
    }

    /// Ask for a new PIN twice through `prompt` and store its hash
    ///
    /// `prompt` reads one line without echo; both entries are zeroized.
    pub fn change_pin<F>(&mut self, mut prompt: F) -> Result<(), ConfigError>
    where
        F: FnMut(&str) -> io::Result<String>,
    {
        let read = |prompt: &mut F, label: &str| {
            prompt(label)
                .map(Zeroizing::new)
                .map_err(|e| ConfigError::Io(e.to_string()))
        };

        let label = format!("New PIN ({} digits): ", self.auth.pin_length);
        let pin = read(&mut prompt, &label)?;
        let confirm = read(&mut prompt, "Confirm PIN: ")?;

        if pin.trim() != confirm.trim() {
            return Err(ConfigError::Invalid("PINs do not match".to_string()));
        }
        self.set_pin(pin.trim())
    }

    /// Build the PIN validator this configuration describes
    pub fn validator(&self) -> Result<Argon2PinValidator, ConfigError> {
        let validator = match &self.pin_hash {
            Some(hash) => Argon2PinValidator::from_phc(hash.clone())?,
            None => {
                tracing::info!("No PIN configured, using the demo PIN");
                Argon2PinValidator::from_pin(DEMO_PIN)?
            }
        };
        Ok(validator.with_delay(Duration::from_millis(self.validation_delay_ms)))
    }

    /// Check every section before starting
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        self.data
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert_eq!(config.biometrics, BiometricMode::NoSensor);
        assert!(config.pin_hash.is_none());
        assert_eq!(config.validation_delay_ms, 800);
        assert_eq!(config.auth.pin_length, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE_NAME);

        let mut config = TuiConfig {
            auth: AuthConfig {
                pin_length: 4,
                ..AuthConfig::default()
            },
            biometrics: BiometricMode::SimulatedFailure,
            validation_delay_ms: 0,
            ..TuiConfig::default()
        };
        assert!(matches!(config.set_pin("654321"), Err(ConfigError::Invalid(_))));
        config.set_pin("4321").unwrap();
        config.save_to(&path).unwrap();

        let loaded = TuiConfig::load_from(&path);
        assert_eq!(loaded, config);
        assert!(loaded.validator().unwrap().verify("4321").is_ok());
    }

    #[test]
    fn test_missing_or_corrupt_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert_eq!(TuiConfig::load_from(&path), TuiConfig::default());

        fs::write(&path, "{ not json").unwrap();
        assert_eq!(TuiConfig::load_from(&path), TuiConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{"biometrics": "simulated-cancel", "auth": {"pin_length": 4}}"#)
            .unwrap();

        let config = TuiConfig::load_from(&path);
        assert_eq!(config.biometrics, BiometricMode::SimulatedCancel);
        assert_eq!(config.auth.pin_length, 4);
        assert_eq!(config.data, MockSourceConfig::default());
    }

    #[test]
    fn test_invalid_sections_rejected() {
        let config = TuiConfig {
            auth: AuthConfig {
                pin_length: 20,
                ..AuthConfig::default()
            },
            ..TuiConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Auth(_))));

        let mut config = TuiConfig::default();
        config.data.failure_rate = 2.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_change_pin_reads_twice() {
        let mut config = TuiConfig::default();
        let mut answers = vec!["654321".to_string(), "654321\n".to_string()].into_iter();
        let mut prompts = Vec::new();

        config
            .change_pin(|label| {
                prompts.push(label.to_string());
                Ok(answers.next().unwrap())
            })
            .unwrap();

        assert_eq!(prompts, ["New PIN (6 digits): ", "Confirm PIN: "]);
        assert!(config.validator().unwrap().verify("654321").is_ok());
    }

    #[test]
    fn test_change_pin_rejects_mismatch() {
        let mut config = TuiConfig::default();
        let mut answers = vec!["654321".to_string(), "654320".to_string()].into_iter();

        let result = config.change_pin(|_| Ok(answers.next().unwrap()));
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        assert!(config.pin_hash.is_none());

        let result = config.change_pin(|_| Err(io::Error::other("no tty")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_bad_pin_hash() {
        let config = TuiConfig {
            pin_hash: Some("garbage".to_string()),
            ..TuiConfig::default()
        };
        assert!(config.validator().is_err());
    }
}
