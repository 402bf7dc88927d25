//! Single pending PIN request
//!
//! Holds the completion handle for whoever opened the PIN modal. At most one
//! request can be outstanding; it is resolved exactly once, on acceptance or
//! on close.

use tokio::sync::oneshot;
use tracing::debug;

use crate::error::AuthError;

/// How a PIN request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinResolution {
    Accepted,
    Cancelled,
}

impl PinResolution {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PinResolution::Accepted)
    }
}

/// Slot for the outstanding request's completion handle
#[derive(Debug, Default)]
pub struct PendingRequest {
    slot: Option<oneshot::Sender<PinResolution>>,
}

impl PendingRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new request
    ///
    /// Fails if one is already outstanding; the existing waiter is kept.
    pub fn install(&mut self) -> Result<oneshot::Receiver<PinResolution>, AuthError> {
        if self.is_pending() {
            return Err(AuthError::RequestInFlight);
        }
        let (tx, rx) = oneshot::channel();
        self.slot = Some(tx);
        Ok(rx)
    }

    /// Resolve and clear the outstanding request
    ///
    /// Returns false when nothing was pending.
    pub fn resolve(&mut self, resolution: PinResolution) -> bool {
        match self.slot.take() {
            Some(tx) => {
                if tx.send(resolution).is_err() {
                    debug!("PIN requester went away before {:?}", resolution);
                }
                true
            }
            None => false,
        }
    }

    /// Whether a live request is outstanding
    pub fn is_pending(&self) -> bool {
        self.slot.as_ref().is_some_and(|tx| !tx.is_closed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolves_once() {
        let mut pending = PendingRequest::new();
        let rx = pending.install().unwrap();
        assert!(pending.is_pending());

        assert!(pending.resolve(PinResolution::Accepted));
        assert!(!pending.resolve(PinResolution::Cancelled));
        assert_eq!(rx.await.unwrap(), PinResolution::Accepted);
        assert!(!pending.is_pending());
    }

    #[test]
    fn test_second_install_rejected() {
        let mut pending = PendingRequest::new();
        let _rx = pending.install().unwrap();
        assert_eq!(pending.install().unwrap_err(), AuthError::RequestInFlight);
    }

    #[test]
    fn test_abandoned_slot_is_reusable() {
        let mut pending = PendingRequest::new();
        drop(pending.install().unwrap());
        assert!(!pending.is_pending());
        assert!(pending.install().is_ok());
    }
}
