//! Authentication gate
//!
//! Single writer of the session. `authenticate()` runs one biometric
//! challenge and, when biometrics fail or are missing, one PIN modal cycle.
//! Concurrent calls are coalesced onto the attempt already in flight.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::Serialize;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use crate::biometric::{AuthOutcome, BiometricPlatform, BiometricProbe};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::events::{AuthEvent, EVENT_CHANNEL_CAPACITY};
use crate::feedback::{ErrorSignal, SilentSignal};
use crate::modal::PinModal;
use crate::session::{AuthSession, SessionSnapshot};
use crate::validator::PinValidator;

/// How a successful `authenticate()` got access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    /// Session was already authenticated; nothing was prompted
    AlreadyAuthenticated,
    Biometric,
    Pin,
}

/// Published result of the in-flight attempt; `None` until it finishes
type AttemptSlot = Option<Result<AuthMethod, AuthError>>;

enum Role {
    Leader(watch::Sender<AttemptSlot>),
    Follower(watch::Receiver<AttemptSlot>),
}

pub struct AuthGate {
    config: AuthConfig,
    session: RwLock<AuthSession>,
    probe: BiometricProbe,
    modal: Arc<PinModal>,
    in_flight: Mutex<Option<watch::Receiver<AttemptSlot>>>,
    events: broadcast::Sender<AuthEvent>,
}

/// Clears the in-flight register when the leading attempt ends
///
/// If the leader is dropped before finishing, the modal is closed so nothing
/// stays on screen waiting for a caller that is gone.
struct FlightGuard<'a> {
    gate: &'a AuthGate,
    finished: bool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.gate
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if !self.finished {
            debug!("Authentication attempt dropped before completion");
            self.gate.modal.close();
        }
    }
}

impl AuthGate {
    pub fn new(
        config: AuthConfig,
        platform: Arc<dyn BiometricPlatform>,
        validator: Arc<dyn PinValidator>,
    ) -> Result<Self, AuthError> {
        Self::with_error_signal(config, platform, validator, Arc::new(SilentSignal))
    }

    /// Build a gate whose PIN rejections fire `signal`
    pub fn with_error_signal(
        config: AuthConfig,
        platform: Arc<dyn BiometricPlatform>,
        validator: Arc<dyn PinValidator>,
        signal: Arc<dyn ErrorSignal>,
    ) -> Result<Self, AuthError> {
        config.validate()?;

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let probe = BiometricProbe::new(platform)
            .with_fallback(config.fallback_label.clone(), config.disable_device_fallback);
        let modal = Arc::new(PinModal::new(
            config.pin_length,
            validator,
            signal,
            events.clone(),
        ));

        Ok(Self {
            config,
            session: RwLock::new(AuthSession::new()),
            probe,
            modal,
            in_flight: Mutex::new(None),
            events,
        })
    }

    /// Authenticate, returning whether access was granted
    pub async fn authenticate(&self) -> bool {
        self.try_authenticate().await.is_ok()
    }

    /// Authenticate, reporting how access was granted or why it was not
    pub async fn try_authenticate(&self) -> Result<AuthMethod, AuthError> {
        if self.is_authenticated() {
            return Ok(AuthMethod::AlreadyAuthenticated);
        }

        let role = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            // The previous leader may have finished between the check above and here
            if self.is_authenticated() {
                return Ok(AuthMethod::AlreadyAuthenticated);
            }
            match slot.as_ref() {
                Some(rx) => Role::Follower(rx.clone()),
                None => {
                    let (tx, rx) = watch::channel(None);
                    *slot = Some(rx);
                    Role::Leader(tx)
                }
            }
        };

        match role {
            Role::Follower(mut rx) => {
                debug!("Joining authentication already in progress");
                match rx.wait_for(Option::is_some).await {
                    Ok(result) => (*result).clone().unwrap_or(Err(AuthError::PinFlowAborted)),
                    Err(_) => Err(AuthError::PinFlowAborted),
                }
            }
            Role::Leader(tx) => {
                let mut guard = FlightGuard {
                    gate: self,
                    finished: false,
                };

                let result = self.run_attempt().await;
                guard.finished = true;

                if let Err(reason) = &result {
                    info!("Authentication denied: {}", reason);
                    self.emit(AuthEvent::Denied {
                        reason: reason.clone(),
                    });
                }

                // Free the register first so later callers start a fresh attempt
                drop(guard);
                tx.send_replace(Some(result.clone()));
                result
            }
        }
    }

    async fn run_attempt(&self) -> Result<AuthMethod, AuthError> {
        let outcome = self.probe.challenge(&self.config.prompt_message).await;
        self.emit(AuthEvent::BiometricChallenged { outcome });

        match outcome {
            AuthOutcome::Success => {
                self.grant(AuthMethod::Biometric);
                Ok(AuthMethod::Biometric)
            }
            AuthOutcome::Cancelled => Err(AuthError::UserCancelled),
            AuthOutcome::Failed | AuthOutcome::NoBiometricsAvailable => {
                if !self.config.fallback_to_pin {
                    return Err(match outcome {
                        AuthOutcome::Failed => {
                            AuthError::ChallengeFailed("biometric verification failed".to_string())
                        }
                        _ => AuthError::HardwareUnavailable,
                    });
                }

                debug!("Falling back to PIN entry after {:?}", outcome);
                let resolution = self.modal.open()?;
                match resolution.await {
                    Ok(resolution) if resolution.is_accepted() => {
                        self.grant(AuthMethod::Pin);
                        Ok(AuthMethod::Pin)
                    }
                    Ok(_) | Err(_) => Err(AuthError::PinFlowAborted),
                }
            }
        }
    }

    fn grant(&self, method: AuthMethod) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .mark_authenticated();

        info!("Authenticated via {:?}", method);
        self.emit(AuthEvent::Authenticated { method });
        self.emit(AuthEvent::RevealChanged { revealed: true });
    }

    /// Flip the reveal flag, authenticating first if needed
    pub async fn toggle_reveal(&self) -> SessionSnapshot {
        let toggled = {
            let mut session = self.session.write().unwrap_or_else(PoisonError::into_inner);
            session.toggle_reveal()
        };

        match toggled {
            Some(revealed) => {
                debug!("Reveal toggled to {}", revealed);
                self.emit(AuthEvent::RevealChanged { revealed });
            }
            None => {
                self.authenticate().await;
            }
        }

        self.snapshot()
    }

    pub fn is_authenticated(&self) -> bool {
        self.snapshot().authenticated
    }

    pub fn is_revealed(&self) -> bool {
        self.snapshot().revealed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
    }

    /// Receive session and modal events
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    /// The PIN modal, for front-ends to render and feed key presses
    pub fn pin_modal(&self) -> &Arc<PinModal> {
        &self.modal
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use futures::FutureExt;

    use super::*;
    use crate::biometric::{NoBiometrics, SimulatedBiometrics};

    struct FixedPin(&'static str);

    #[async_trait]
    impl PinValidator for FixedPin {
        async fn validate(&self, pin: &str) -> bool {
            pin == self.0
        }
    }

    fn gate(platform: Arc<dyn BiometricPlatform>) -> Arc<AuthGate> {
        let validator = Arc::new(FixedPin("123456"));
        Arc::new(AuthGate::new(AuthConfig::default(), platform, validator).unwrap())
    }

    async fn wait_for_modal(gate: &AuthGate) {
        while !gate.pin_modal().is_visible() {
            tokio::task::yield_now().await;
        }
    }

    async fn enter(gate: &AuthGate, pin: &str) {
        for d in pin.chars() {
            gate.pin_modal().press_digit(d).await;
        }
    }

    #[tokio::test]
    async fn test_biometric_success() {
        let platform = Arc::new(SimulatedBiometrics::succeeding());
        let gate = gate(platform.clone());

        assert_eq!(gate.try_authenticate().await, Ok(AuthMethod::Biometric));
        assert!(gate.is_authenticated());
        assert!(gate.is_revealed());
        assert!(!gate.pin_modal().is_visible());

        // Idempotent, no second prompt
        assert_eq!(gate.try_authenticate().await, Ok(AuthMethod::AlreadyAuthenticated));
        assert_eq!(platform.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_already_authenticated_takes_no_await() {
        let gate = gate(Arc::new(SimulatedBiometrics::succeeding()));
        assert!(gate.authenticate().await);

        assert_eq!(gate.authenticate().now_or_never(), Some(true));
    }

    #[tokio::test]
    async fn test_cancel_skips_pin() {
        let gate = gate(Arc::new(SimulatedBiometrics::cancelling()));

        assert_eq!(gate.try_authenticate().await, Err(AuthError::UserCancelled));
        assert!(!gate.is_authenticated());
        assert!(!gate.pin_modal().is_visible());
    }

    #[tokio::test]
    async fn test_failure_falls_back_to_pin() {
        let gate = gate(Arc::new(SimulatedBiometrics::failing()));

        let attempt = tokio::spawn({
            let gate = gate.clone();
            async move { gate.try_authenticate().await }
        });

        wait_for_modal(&gate).await;
        enter(&gate, "123456").await;

        assert_eq!(attempt.await.unwrap(), Ok(AuthMethod::Pin));
        assert!(gate.is_revealed());
    }

    #[tokio::test]
    async fn test_close_resolves_false() {
        let gate = gate(Arc::new(NoBiometrics));

        let attempt = tokio::spawn({
            let gate = gate.clone();
            async move { gate.authenticate().await }
        });

        wait_for_modal(&gate).await;
        gate.pin_modal().close();

        assert!(!attempt.await.unwrap());
        assert_eq!(gate.snapshot(), SessionSnapshot::default());
    }

    #[tokio::test]
    async fn test_no_fallback_when_disabled() {
        let gate = AuthGate::new(
            AuthConfig::biometric_only(),
            Arc::new(NoBiometrics),
            Arc::new(FixedPin("123456")),
        )
        .unwrap();
        assert_eq!(gate.try_authenticate().await, Err(AuthError::HardwareUnavailable));

        let gate = AuthGate::new(
            AuthConfig::biometric_only(),
            Arc::new(SimulatedBiometrics::failing()),
            Arc::new(FixedPin("123456")),
        )
        .unwrap();
        assert!(matches!(
            gate.try_authenticate().await,
            Err(AuthError::ChallengeFailed(_))
        ));
        assert!(!gate.pin_modal().is_visible());
    }

    #[tokio::test]
    async fn test_concurrent_calls_are_coalesced() {
        let platform = Arc::new(SimulatedBiometrics::failing());
        let gate = gate(platform.clone());

        let first = tokio::spawn({
            let gate = gate.clone();
            async move { gate.try_authenticate().await }
        });
        wait_for_modal(&gate).await;

        let second = tokio::spawn({
            let gate = gate.clone();
            async move { gate.try_authenticate().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        enter(&gate, "123456").await;

        assert_eq!(first.await.unwrap(), Ok(AuthMethod::Pin));
        assert_eq!(second.await.unwrap(), Ok(AuthMethod::Pin));
        assert_eq!(platform.prompt_count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_leader_closes_modal() {
        let gate = gate(Arc::new(NoBiometrics));

        let leader = tokio::spawn({
            let gate = gate.clone();
            async move { gate.authenticate().await }
        });
        wait_for_modal(&gate).await;

        let follower = tokio::spawn({
            let gate = gate.clone();
            async move { gate.try_authenticate().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        leader.abort();
        assert!(leader.await.unwrap_err().is_cancelled());

        assert_eq!(follower.await.unwrap(), Err(AuthError::PinFlowAborted));
        assert!(!gate.pin_modal().is_visible());

        // A fresh attempt can start again
        let retry = tokio::spawn({
            let gate = gate.clone();
            async move { gate.authenticate().await }
        });
        wait_for_modal(&gate).await;
        enter(&gate, "123456").await;
        assert!(retry.await.unwrap());
    }

    #[tokio::test]
    async fn test_register_cleared_before_result_published() {
        let gate = gate(Arc::new(NoBiometrics));

        let leader = tokio::spawn({
            let gate = gate.clone();
            async move { gate.try_authenticate().await }
        });
        wait_for_modal(&gate).await;

        let mut rx = gate
            .in_flight
            .lock()
            .unwrap()
            .clone()
            .expect("attempt in flight");
        let watcher = tokio::spawn({
            let gate = gate.clone();
            async move {
                rx.wait_for(Option::is_some).await.unwrap();
                gate.in_flight.lock().unwrap().is_none()
            }
        });

        gate.pin_modal().close();
        assert_eq!(leader.await.unwrap(), Err(AuthError::PinFlowAborted));
        assert!(watcher.await.unwrap());

        // The next call challenges again instead of reusing the failure
        let retry = tokio::spawn({
            let gate = gate.clone();
            async move { gate.authenticate().await }
        });
        wait_for_modal(&gate).await;
        enter(&gate, "123456").await;
        assert!(retry.await.unwrap());
    }

    #[tokio::test]
    async fn test_toggle_reveal() {
        let gate = gate(Arc::new(SimulatedBiometrics::succeeding()));

        // Unauthenticated toggle authenticates and reveals
        let snapshot = gate.toggle_reveal().await;
        assert!(snapshot.is_authenticated());
        assert!(snapshot.is_revealed());

        assert!(!gate.toggle_reveal().await.is_revealed());
        assert!(gate.toggle_reveal().await.is_revealed());
        assert!(gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_toggle_reveal_denied_leaves_state() {
        let gate = gate(Arc::new(SimulatedBiometrics::cancelling()));
        assert_eq!(gate.toggle_reveal().await, SessionSnapshot::default());
    }

    #[tokio::test]
    async fn test_events() {
        let gate = gate(Arc::new(SimulatedBiometrics::succeeding()));
        let mut events = gate.subscribe();

        gate.authenticate().await;
        gate.toggle_reveal().await;

        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::BiometricChallenged {
                outcome: AuthOutcome::Success
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::Authenticated {
                method: AuthMethod::Biometric
            }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::RevealChanged { revealed: true }
        );
        assert_eq!(
            events.recv().await.unwrap(),
            AuthEvent::RevealChanged { revealed: false }
        );
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AuthConfig {
            pin_length: 2,
            ..AuthConfig::default()
        };
        assert!(AuthGate::new(config, Arc::new(NoBiometrics), Arc::new(FixedPin("12"))).is_err());
    }
}
