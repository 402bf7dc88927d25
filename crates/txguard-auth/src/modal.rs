//! PIN modal: async driver around the keypad
//!
//! Owns visibility, the keypad and the pending request. Validation is
//! awaited with the lock released so readers (the renderer) are never
//! blocked behind the validator.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, oneshot};
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::events::AuthEvent;
use crate::feedback::{ErrorSignal, ERROR_VIBRATION_PATTERN};
use crate::keypad::{KeyPress, PinKeypad, Submission, Verdict};
use crate::pending::{PendingRequest, PinResolution};
use crate::validator::PinValidator;

/// Read-only view of the modal for rendering
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PinEntryState {
    pub visible: bool,
    pub digits_entered: usize,
    pub pin_length: usize,
    pub is_validating: bool,
    pub error_message: Option<String>,
}

struct ModalInner {
    visible: bool,
    keypad: PinKeypad,
    pending: PendingRequest,
}

pub struct PinModal {
    inner: Mutex<ModalInner>,
    validator: Arc<dyn PinValidator>,
    signal: Arc<dyn ErrorSignal>,
    events: broadcast::Sender<AuthEvent>,
}

impl PinModal {
    pub fn new(
        pin_length: usize,
        validator: Arc<dyn PinValidator>,
        signal: Arc<dyn ErrorSignal>,
        events: broadcast::Sender<AuthEvent>,
    ) -> Self {
        Self {
            inner: Mutex::new(ModalInner {
                visible: false,
                keypad: PinKeypad::new(pin_length),
                pending: PendingRequest::new(),
            }),
            validator,
            signal,
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ModalInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: AuthEvent) {
        let _ = self.events.send(event);
    }

    /// Show the keypad and register a request
    ///
    /// The receiver completes exactly once: `Accepted` on a valid PIN,
    /// `Cancelled` on close.
    pub fn open(&self) -> Result<oneshot::Receiver<PinResolution>, AuthError> {
        let rx = {
            let mut inner = self.lock();
            let rx = inner.pending.install()?;
            inner.keypad.reset();
            inner.visible = true;
            rx
        };

        info!("PIN entry opened");
        self.emit(AuthEvent::PinModalOpened);
        Ok(rx)
    }

    /// Press a digit key
    ///
    /// When the press completes the PIN this awaits the validator and returns
    /// the verdict; otherwise returns `None`.
    pub async fn press_digit(&self, digit: char) -> Option<Verdict> {
        let submission = self.accept_digit(digit)?;
        self.submit(submission).await
    }

    /// Apply a digit key without waiting on validation
    ///
    /// Returns the submission once the PIN is complete; the keypad stays
    /// locked until [`PinModal::submit`] finishes with it.
    pub fn accept_digit(&self, digit: char) -> Option<Submission> {
        let mut inner = self.lock();
        if !inner.visible {
            return None;
        }
        match inner.keypad.press_digit(digit) {
            KeyPress::Submit(submission) => Some(submission),
            KeyPress::Updated | KeyPress::Ignored => None,
        }
    }

    /// Validate a completed PIN and apply the verdict
    pub async fn submit(&self, submission: Submission) -> Option<Verdict> {
        debug!("Validating PIN");
        let valid = self.validator.validate(submission.pin()).await;
        self.finish(submission.epoch(), valid)
    }

    fn finish(&self, epoch: u64, valid: bool) -> Option<Verdict> {
        let mut inner = self.lock();
        let verdict = inner.keypad.complete(epoch, valid);

        match verdict {
            Some(Verdict::Accepted) => {
                inner.pending.resolve(PinResolution::Accepted);
                inner.visible = false;
                inner.keypad.reset();
                drop(inner);

                info!("PIN accepted");
                self.emit(AuthEvent::PinModalClosed { accepted: true });
            }
            Some(Verdict::Rejected) => {
                let message = inner.keypad.error_message().unwrap_or_default().to_string();
                drop(inner);

                warn!("Incorrect PIN entered; retries are not limited");
                self.signal.vibrate(&ERROR_VIBRATION_PATTERN);
                self.emit(AuthEvent::PinRejected { message });
            }
            None => debug!("Discarding stale PIN verdict"),
        }

        verdict
    }

    /// Press backspace
    pub fn press_delete(&self) -> bool {
        let mut inner = self.lock();
        inner.visible && inner.keypad.press_delete()
    }

    /// Hide the keypad, failing any pending request
    ///
    /// Returns false if the modal was already closed.
    pub fn close(&self) -> bool {
        {
            let mut inner = self.lock();
            if !inner.visible && !inner.pending.is_pending() {
                return false;
            }
            inner.pending.resolve(PinResolution::Cancelled);
            inner.visible = false;
            inner.keypad.reset();
        }

        info!("PIN entry closed");
        self.emit(AuthEvent::PinModalClosed { accepted: false });
        true
    }

    pub fn is_visible(&self) -> bool {
        self.lock().visible
    }

    pub fn state(&self) -> PinEntryState {
        let inner = self.lock();
        PinEntryState {
            visible: inner.visible,
            digits_entered: inner.keypad.digits_entered(),
            pin_length: inner.keypad.pin_length(),
            is_validating: inner.keypad.is_validating(),
            error_message: inner.keypad.error_message().map(str::to_string),
        }
    }
}
