//! Process-wide authentication and reveal state

/// Session flags
///
/// `revealed` may only be true once `authenticated` is, and `authenticated`
/// never goes back to false.
#[derive(Debug, Default)]
pub struct AuthSession {
    authenticated: bool,
    revealed: bool,
}

/// Point-in-time copy of the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSnapshot {
    pub authenticated: bool,
    pub revealed: bool,
}

impl SessionSnapshot {
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

impl AuthSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant access and reveal amounts
    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
        self.revealed = true;
    }

    /// Flip the reveal flag
    ///
    /// Returns the new value, or `None` when the session is not authenticated
    /// (the flag is left untouched).
    pub fn toggle_reveal(&mut self) -> Option<bool> {
        if !self.authenticated {
            return None;
        }
        self.revealed = !self.revealed;
        Some(self.revealed)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            authenticated: self.authenticated,
            revealed: self.revealed,
        }
    }
}
