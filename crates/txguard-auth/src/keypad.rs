//! PIN keypad state machine
//!
//! Pure and synchronous: the keypad never calls the validator itself. When
//! the last digit lands it hands a [`Submission`] back to the caller, who
//! awaits validation and reports the verdict with [`PinKeypad::complete`].
//!
//! ```text
//! Idle --digit--> Entering --Nth digit--> Submitting --valid--> Accepted
//!                    ^                        |
//!                    +--------invalid---------+  (digits cleared, error set)
//! ```

use zeroize::{Zeroize, Zeroizing};

/// Error text shown after a rejected PIN
pub const INCORRECT_PIN_MESSAGE: &str = "Incorrect PIN. Please try again.";

/// Keypad phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeypadPhase {
    /// Freshly opened, nothing typed
    #[default]
    Idle,
    /// Collecting digits
    Entering,
    /// All digits collected, waiting for the validator; input locked
    Submitting,
    /// Validator accepted the PIN; terminal until reset
    Accepted,
}

/// A complete PIN handed to the validator
///
/// The epoch ties the eventual verdict to this particular keypad session, so
/// a verdict that arrives after the keypad was reset is discarded.
pub struct Submission {
    pin: Zeroizing<String>,
    epoch: u64,
}

impl Submission {
    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl std::fmt::Debug for Submission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Submission")
            .field("pin", &"<redacted>")
            .field("epoch", &self.epoch)
            .finish()
    }
}

/// Result of a key press
#[derive(Debug)]
pub enum KeyPress {
    /// Press had no effect
    Ignored,
    /// Digit buffer changed
    Updated,
    /// Buffer is full; validate this submission
    Submit(Submission),
}

/// Validator verdict as applied to the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// Fixed-length PIN entry
pub struct PinKeypad {
    pin_length: usize,
    digits: Zeroizing<String>,
    phase: KeypadPhase,
    error: Option<String>,
    epoch: u64,
}

impl PinKeypad {
    pub fn new(pin_length: usize) -> Self {
        Self {
            pin_length,
            digits: Zeroizing::new(String::with_capacity(pin_length)),
            phase: KeypadPhase::Idle,
            error: None,
            epoch: 0,
        }
    }

    /// Append a digit
    pub fn press_digit(&mut self, digit: char) -> KeyPress {
        if !digit.is_ascii_digit()
            || matches!(self.phase, KeypadPhase::Submitting | KeypadPhase::Accepted)
            || self.digits.len() >= self.pin_length
        {
            return KeyPress::Ignored;
        }

        self.digits.push(digit);
        self.error = None;

        if self.digits.len() == self.pin_length {
            self.phase = KeypadPhase::Submitting;
            return KeyPress::Submit(Submission {
                pin: Zeroizing::new(self.digits.as_str().to_owned()),
                epoch: self.epoch,
            });
        }

        self.phase = KeypadPhase::Entering;
        KeyPress::Updated
    }

    /// Remove the last digit; returns whether anything changed
    pub fn press_delete(&mut self) -> bool {
        if matches!(self.phase, KeypadPhase::Submitting | KeypadPhase::Accepted)
            || self.digits.is_empty()
        {
            return false;
        }

        self.digits.pop();
        self.error = None;
        self.phase = KeypadPhase::Entering;
        true
    }

    /// Apply the validator's answer for `epoch`
    ///
    /// Returns `None` when no submission from that epoch is outstanding.
    pub fn complete(&mut self, epoch: u64, valid: bool) -> Option<Verdict> {
        if self.phase != KeypadPhase::Submitting || epoch != self.epoch {
            return None;
        }

        self.digits.zeroize();

        if valid {
            self.phase = KeypadPhase::Accepted;
            Some(Verdict::Accepted)
        } else {
            self.phase = KeypadPhase::Entering;
            self.error = Some(INCORRECT_PIN_MESSAGE.to_string());
            Some(Verdict::Rejected)
        }
    }

    /// Clear everything and start a new epoch
    pub fn reset(&mut self) {
        self.digits.zeroize();
        self.error = None;
        self.phase = KeypadPhase::Idle;
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub fn phase(&self) -> KeypadPhase {
        self.phase
    }

    pub fn pin_length(&self) -> usize {
        self.pin_length
    }

    pub fn digits_entered(&self) -> usize {
        self.digits.len()
    }

    pub fn is_validating(&self) -> bool {
        self.phase == KeypadPhase::Submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(keypad: &mut PinKeypad, digits: &str) -> Option<Submission> {
        let mut submission = None;
        for d in digits.chars() {
            if let KeyPress::Submit(s) = keypad.press_digit(d) {
                submission = Some(s);
            }
        }
        submission
    }

    #[test]
    fn test_collects_up_to_length() {
        let mut keypad = PinKeypad::new(6);
        assert_eq!(keypad.phase(), KeypadPhase::Idle);

        assert!(matches!(keypad.press_digit('1'), KeyPress::Updated));
        assert_eq!(keypad.phase(), KeypadPhase::Entering);

        let submission = type_digits(&mut keypad, "23456").unwrap();
        assert_eq!(submission.pin(), "123456");
        assert!(keypad.is_validating());

        // Locked while submitting
        assert!(matches!(keypad.press_digit('7'), KeyPress::Ignored));
        assert!(!keypad.press_delete());
        assert_eq!(keypad.digits_entered(), 6);
    }

    #[test]
    fn test_non_digits_ignored() {
        let mut keypad = PinKeypad::new(6);
        assert!(matches!(keypad.press_digit('a'), KeyPress::Ignored));
        assert!(matches!(keypad.press_digit(' '), KeyPress::Ignored));
        assert_eq!(keypad.digits_entered(), 0);
    }

    #[test]
    fn test_delete() {
        let mut keypad = PinKeypad::new(6);
        assert!(!keypad.press_delete());

        type_digits(&mut keypad, "12");
        assert!(keypad.press_delete());
        assert_eq!(keypad.digits_entered(), 1);
    }

    #[test]
    fn test_rejection_clears_and_sets_error() {
        let mut keypad = PinKeypad::new(6);
        let submission = type_digits(&mut keypad, "111111").unwrap();

        assert_eq!(keypad.complete(submission.epoch(), false), Some(Verdict::Rejected));
        assert_eq!(keypad.phase(), KeypadPhase::Entering);
        assert_eq!(keypad.digits_entered(), 0);
        assert_eq!(keypad.error_message(), Some(INCORRECT_PIN_MESSAGE));

        // Typing again clears the error
        keypad.press_digit('1');
        assert!(keypad.error_message().is_none());
    }

    #[test]
    fn test_delete_clears_error() {
        let mut keypad = PinKeypad::new(4);
        let submission = type_digits(&mut keypad, "0000").unwrap();
        keypad.complete(submission.epoch(), false);
        type_digits(&mut keypad, "1");
        keypad.complete(submission.epoch(), false);

        assert!(keypad.press_delete());
        assert!(keypad.error_message().is_none());
    }

    #[test]
    fn test_acceptance_is_terminal() {
        let mut keypad = PinKeypad::new(6);
        let submission = type_digits(&mut keypad, "123456").unwrap();

        assert_eq!(keypad.complete(submission.epoch(), true), Some(Verdict::Accepted));
        assert_eq!(keypad.phase(), KeypadPhase::Accepted);
        assert!(matches!(keypad.press_digit('1'), KeyPress::Ignored));
    }

    #[test]
    fn test_stale_verdict_discarded() {
        let mut keypad = PinKeypad::new(6);
        let submission = type_digits(&mut keypad, "123456").unwrap();

        keypad.reset();
        assert_eq!(keypad.complete(submission.epoch(), true), None);
        assert_eq!(keypad.phase(), KeypadPhase::Idle);

        // A fresh submission in the new epoch is honored
        let fresh = type_digits(&mut keypad, "123456").unwrap();
        assert_ne!(fresh.epoch(), submission.epoch());
        assert_eq!(keypad.complete(submission.epoch(), true), None);
        assert_eq!(keypad.complete(fresh.epoch(), true), Some(Verdict::Accepted));
    }

    #[test]
    fn test_submission_debug_redacts_pin() {
        let mut keypad = PinKeypad::new(4);
        let submission = type_digits(&mut keypad, "9876").unwrap();
        assert!(!format!("{:?}", submission).contains("9876"));
    }
}
