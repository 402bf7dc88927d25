//! Biometric probe over the platform's secure authentication API
//!
//! The platform seam is [`BiometricPlatform`]. [`BiometricProbe`] wraps it,
//! checks availability before prompting, and collapses every platform result
//! into an [`AuthOutcome`]. Platform errors stop here.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Platform error code for an explicit user dismissal
pub const USER_CANCEL: &str = "user_cancel";

/// Categorical result of one biometric challenge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthOutcome {
    /// Platform verified the user
    Success,
    /// Wrong biometric, timeout, lockout or platform error
    Failed,
    /// No sensor or nothing enrolled; the prompt was never shown
    NoBiometricsAvailable,
    /// User dismissed the prompt
    Cancelled,
}

/// Sensor capability and enrollment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Availability {
    pub has_hardware: bool,
    pub is_enrolled: bool,
}

impl Availability {
    /// Whether a prompt can be shown at all
    pub fn can_prompt(&self) -> bool {
        self.has_hardware && self.is_enrolled
    }
}

/// Options passed to the platform prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptOptions {
    pub message: String,
    pub fallback_label: String,
    pub disable_device_fallback: bool,
}

/// Raw platform prompt result
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PromptResult {
    pub success: bool,
    /// Platform error code (`user_cancel`, `lockout`, ...)
    pub error: Option<String>,
}

impl PromptResult {
    pub fn success() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn failure(code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(code.into()),
        }
    }
}

/// Errors raised by a platform implementation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("Biometric platform error: {0}")]
    Platform(String),

    #[error("Biometric service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Platform secure-authentication API
#[async_trait]
pub trait BiometricPlatform: Send + Sync {
    /// Whether a biometric sensor is present
    async fn has_hardware(&self) -> Result<bool, PlatformError>;

    /// Whether at least one biometric credential is enrolled
    async fn is_enrolled(&self) -> Result<bool, PlatformError>;

    /// Show the biometric prompt once
    async fn prompt(&self, options: &PromptOptions) -> Result<PromptResult, PlatformError>;

    /// Platform name for logs
    fn platform_name(&self) -> &'static str;
}

/// Single-shot biometric challenge with normalized outcomes
#[derive(Clone)]
pub struct BiometricProbe {
    platform: Arc<dyn BiometricPlatform>,
    fallback_label: String,
    disable_device_fallback: bool,
}

impl BiometricProbe {
    pub fn new(platform: Arc<dyn BiometricPlatform>) -> Self {
        Self {
            platform,
            fallback_label: "Use PIN".to_string(),
            disable_device_fallback: false,
        }
    }

    /// Override the prompt's fallback button
    pub fn with_fallback(
        mut self,
        label: impl Into<String>,
        disable_device_fallback: bool,
    ) -> Self {
        self.fallback_label = label.into();
        self.disable_device_fallback = disable_device_fallback;
        self
    }

    /// Query sensor presence and enrollment
    pub async fn check_availability(&self) -> Result<Availability, PlatformError> {
        let has_hardware = self.platform.has_hardware().await?;
        let is_enrolled = self.platform.is_enrolled().await?;
        Ok(Availability {
            has_hardware,
            is_enrolled,
        })
    }

    /// Run exactly one challenge
    ///
    /// Never prompts when biometrics are unavailable, and never returns a
    /// platform error: anything unexpected becomes `Failed`.
    pub async fn challenge(&self, prompt_message: &str) -> AuthOutcome {
        let availability = match self.check_availability().await {
            Ok(availability) => availability,
            Err(e) => {
                error!("Biometric availability check failed: {}", e);
                return AuthOutcome::Failed;
            }
        };

        if !availability.can_prompt() {
            debug!(
                "Biometrics unavailable on {} (hardware: {}, enrolled: {})",
                self.platform.platform_name(),
                availability.has_hardware,
                availability.is_enrolled
            );
            return AuthOutcome::NoBiometricsAvailable;
        }

        let options = PromptOptions {
            message: prompt_message.to_string(),
            fallback_label: self.fallback_label.clone(),
            disable_device_fallback: self.disable_device_fallback,
        };

        let outcome = match self.platform.prompt(&options).await {
            Ok(result) if result.success => AuthOutcome::Success,
            Ok(result) if result.error.as_deref() == Some(USER_CANCEL) => AuthOutcome::Cancelled,
            Ok(result) => {
                info!(
                    "Biometric challenge rejected: {}",
                    result.error.as_deref().unwrap_or("unknown")
                );
                AuthOutcome::Failed
            }
            Err(e) => {
                error!("Biometric authentication error: {}", e);
                AuthOutcome::Failed
            }
        };

        debug!("Biometric challenge outcome: {:?}", outcome);
        outcome
    }
}

/// Platform without a biometric sensor
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBiometrics;

#[async_trait]
impl BiometricPlatform for NoBiometrics {
    async fn has_hardware(&self) -> Result<bool, PlatformError> {
        Ok(false)
    }

    async fn is_enrolled(&self) -> Result<bool, PlatformError> {
        Ok(false)
    }

    async fn prompt(&self, _options: &PromptOptions) -> Result<PromptResult, PlatformError> {
        Err(PlatformError::ServiceUnavailable(
            "no biometric sensor".to_string(),
        ))
    }

    fn platform_name(&self) -> &'static str {
        "none"
    }
}

/// Scripted platform for demos and tests
///
/// Every prompt returns the same configured result and is counted.
#[derive(Debug)]
pub struct SimulatedBiometrics {
    enrolled: bool,
    result: Result<PromptResult, PlatformError>,
    prompts: AtomicUsize,
}

impl SimulatedBiometrics {
    pub fn new(enrolled: bool, result: Result<PromptResult, PlatformError>) -> Self {
        Self {
            enrolled,
            result,
            prompts: AtomicUsize::new(0),
        }
    }

    /// Enrolled sensor that always verifies the user
    pub fn succeeding() -> Self {
        Self::new(true, Ok(PromptResult::success()))
    }

    /// Enrolled sensor that never matches
    pub fn failing() -> Self {
        Self::new(true, Ok(PromptResult::failure("authentication_failed")))
    }

    /// Enrolled sensor whose prompt the user always dismisses
    pub fn cancelling() -> Self {
        Self::new(true, Ok(PromptResult::failure(USER_CANCEL)))
    }

    /// Sensor present but nothing enrolled
    pub fn unenrolled() -> Self {
        Self::new(false, Ok(PromptResult::success()))
    }

    /// Number of prompts shown so far
    pub fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BiometricPlatform for SimulatedBiometrics {
    async fn has_hardware(&self) -> Result<bool, PlatformError> {
        Ok(true)
    }

    async fn is_enrolled(&self) -> Result<bool, PlatformError> {
        Ok(self.enrolled)
    }

    async fn prompt(&self, _options: &PromptOptions) -> Result<PromptResult, PlatformError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn platform_name(&self) -> &'static str {
        "simulated"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPlatform;

    #[async_trait]
    impl BiometricPlatform for BrokenPlatform {
        async fn has_hardware(&self) -> Result<bool, PlatformError> {
            Err(PlatformError::Platform("sensor driver crashed".to_string()))
        }

        async fn is_enrolled(&self) -> Result<bool, PlatformError> {
            Ok(true)
        }

        async fn prompt(&self, _options: &PromptOptions) -> Result<PromptResult, PlatformError> {
            Ok(PromptResult::success())
        }

        fn platform_name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_success() {
        let platform = Arc::new(SimulatedBiometrics::succeeding());
        let probe = BiometricProbe::new(platform.clone());

        assert_eq!(probe.challenge("Unlock").await, AuthOutcome::Success);
        assert_eq!(platform.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_user_cancel_maps_to_cancelled() {
        let probe = BiometricProbe::new(Arc::new(SimulatedBiometrics::cancelling()));
        assert_eq!(probe.challenge("Unlock").await, AuthOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_other_errors_map_to_failed() {
        let probe = BiometricProbe::new(Arc::new(SimulatedBiometrics::new(
            true,
            Ok(PromptResult::failure("lockout")),
        )));
        assert_eq!(probe.challenge("Unlock").await, AuthOutcome::Failed);
    }

    #[tokio::test]
    async fn test_prompt_error_is_normalized() {
        let probe = BiometricProbe::new(Arc::new(SimulatedBiometrics::new(
            true,
            Err(PlatformError::Platform("timeout".to_string())),
        )));
        assert_eq!(probe.challenge("Unlock").await, AuthOutcome::Failed);
    }

    #[tokio::test]
    async fn test_availability_error_is_normalized() {
        let probe = BiometricProbe::new(Arc::new(BrokenPlatform));
        assert!(probe.check_availability().await.is_err());
        assert_eq!(probe.challenge("Unlock").await, AuthOutcome::Failed);
    }

    #[tokio::test]
    async fn test_unavailable_never_prompts() {
        let platform = Arc::new(SimulatedBiometrics::unenrolled());
        let probe = BiometricProbe::new(platform.clone());

        assert_eq!(
            probe.challenge("Unlock").await,
            AuthOutcome::NoBiometricsAvailable
        );
        assert_eq!(platform.prompt_count(), 0);

        let probe = BiometricProbe::new(Arc::new(NoBiometrics));
        assert_eq!(
            probe.challenge("Unlock").await,
            AuthOutcome::NoBiometricsAvailable
        );
    }
}
