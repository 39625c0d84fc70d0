//! Watch-channel wallet session

use crate::traits::WalletIdentityProvider;
use crate::types::WalletIdentity;
use tokio::sync::watch;

/// Wallet connection state shared between the wallet layer and the
/// dashboard.
///
/// The wallet side calls [`connect`](Self::connect) and
/// [`disconnect`](Self::disconnect); the dashboard reads the current
/// value or [`subscribe`](Self::subscribe)s to changes.
///
/// # Example
///
/// ```rust,ignore
/// let session = WalletSession::new();
/// let updates = session.subscribe();
/// tokio::spawn(async move { dashboard.drive(updates).await });
///
/// session.connect("0x7a1f...");
/// ```
#[derive(Debug)]
pub struct WalletSession {
    sender: watch::Sender<WalletIdentity>,
}

impl WalletSession {
    /// Start disconnected
    pub fn new() -> Self {
        Self::with_identity(WalletIdentity::Disconnected)
    }

    pub fn with_identity(identity: WalletIdentity) -> Self {
        let (sender, _) = watch::channel(identity);
        Self { sender }
    }

    pub fn connect(&self, address: impl Into<String>) {
        self.set(WalletIdentity::Connected(address.into()));
    }

    pub fn disconnect(&self) {
        self.set(WalletIdentity::Disconnected);
    }

    /// Publish a new identity. Re-publishing the current value does not
    /// wake subscribers.
    pub fn set(&self, identity: WalletIdentity) {
        self.sender.send_if_modified(|current| {
            if *current == identity {
                false
            } else {
                tracing::debug!(connected = identity.is_connected(), "Wallet identity changed");
                *current = identity;
                true
            }
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<WalletIdentity> {
        self.sender.subscribe()
    }
}

impl Default for WalletSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletIdentityProvider for WalletSession {
    fn current(&self) -> WalletIdentity {
        self.sender.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_and_disconnect() {
        let session = WalletSession::new();
        assert_eq!(session.current(), WalletIdentity::Disconnected);

        session.connect("0xA");
        assert_eq!(session.current(), WalletIdentity::connected("0xA"));

        session.disconnect();
        assert_eq!(session.current(), WalletIdentity::Disconnected);
    }

    #[tokio::test]
    async fn test_same_identity_does_not_notify() {
        let session = WalletSession::new();
        let mut updates = session.subscribe();

        session.connect("0xA");
        assert!(updates.has_changed().unwrap());
        let _ = updates.borrow_and_update();

        session.connect("0xA");
        assert!(!updates.has_changed().unwrap());
    }
}
