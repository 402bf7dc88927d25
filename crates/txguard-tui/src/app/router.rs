//! Navigation router for screen transitions

use super::state::Screen;

/// Router manages navigation history
///
/// The bottom of the stack is always the history list.
pub struct Router {
    /// Navigation history stack
    history: Vec<Screen>,
    /// Maximum history depth
    max_depth: usize,
}

impl Router {
    /// Create a new router rooted at the history list
    pub fn new() -> Self {
        Self {
            history: vec![Screen::History],
            max_depth: 20,
        }
    }

    /// Push a new screen onto the history
    pub fn push(&mut self, screen: Screen) {
        // Limit history depth, keeping the root
        if self.history.len() >= self.max_depth {
            self.history.remove(1);
        }

        self.history.push(screen);
    }

    /// Go back to the previous screen
    ///
    /// The root screen is never popped.
    pub fn back(&mut self) -> &Screen {
        if self.can_go_back() {
            self.history.pop();
        }
        self.current()
    }

    /// Get the current screen
    pub fn current(&self) -> &Screen {
        // The root is never removed
        &self.history[self.history.len() - 1]
    }

    /// Get the breadcrumb trail
    pub fn breadcrumb(&self) -> String {
        self.history
            .iter()
            .map(Self::screen_title)
            .collect::<Vec<_>>()
            .join(" > ")
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        self.history.len() > 1
    }

    /// Get title for a screen
    pub fn screen_title(screen: &Screen) -> &'static str {
        match screen {
            Screen::History => "Transactions",
            Screen::Detail(_) => "Details",
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use txguard_core::TransactionId;

    #[test]
    fn test_push_and_back() {
        let mut router = Router::new();
        assert_eq!(router.current(), &Screen::History);
        assert!(!router.can_go_back());

        router.push(Screen::Detail(TransactionId::from("tx-1")));
        assert_eq!(router.breadcrumb(), "Transactions > Details");

        assert_eq!(router.back(), &Screen::History);
        assert_eq!(router.back(), &Screen::History);
    }

    #[test]
    fn test_depth_limit_keeps_root() {
        let mut router = Router::new();
        for i in 0..50 {
            router.push(Screen::Detail(TransactionId::new(format!("tx-{}", i))));
        }
        while router.can_go_back() {
            router.back();
        }
        assert_eq!(router.current(), &Screen::History);
    }
}
