//! Terminal error signal

use std::io::{self, Write};
use std::time::Duration;

use txguard_auth::ErrorSignal;

/// Rings the terminal bell in place of a vibration
///
/// One bell per buzz in the pattern (odd positions are pauses).
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBell;

impl ErrorSignal for TerminalBell {
    fn vibrate(&self, pattern: &[Duration]) {
        let buzzes = pattern.iter().skip(1).step_by(2).count().max(1);
        let mut stdout = io::stdout();
        for _ in 0..buzzes {
            let _ = stdout.write_all(b"\x07");
        }
        let _ = stdout.flush();
    }
}
