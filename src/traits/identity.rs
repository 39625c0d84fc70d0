//! Wallet identity provider trait

use crate::types::WalletIdentity;

/// Source of the current wallet connection state.
///
/// Read once per aggregation cycle. Implementations must not block.
pub trait WalletIdentityProvider: Send + Sync {
    fn current(&self) -> WalletIdentity;
}

impl WalletIdentityProvider for WalletIdentity {
    fn current(&self) -> WalletIdentity {
        self.clone()
    }
}
