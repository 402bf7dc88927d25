//! Error feedback for rejected PINs

use std::time::Duration;

/// Vibration pattern played on a rejected PIN: wait, buzz, pause, buzz
pub const ERROR_VIBRATION_PATTERN: [Duration; 4] = [
    Duration::from_millis(0),
    Duration::from_millis(100),
    Duration::from_millis(50),
    Duration::from_millis(100),
];

/// Device-level error signal (haptics, bell, ...)
pub trait ErrorSignal: Send + Sync {
    fn vibrate(&self, pattern: &[Duration]);
}

/// Signal that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSignal;

impl ErrorSignal for SilentSignal {
    fn vibrate(&self, _pattern: &[Duration]) {}
}
