//! Identity gate and cycle trigger
//!
//! Decides whether a ledger query should run for the current wallet
//! state, and whether a change in that state starts a new cycle.

mod session;

pub use session::WalletSession;

use crate::types::WalletIdentity;

/// Outcome of gating one identity snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// No wallet connected; nothing is fetched
    Skip,
    /// Query the ledger for this address
    Proceed(String),
}

/// Gate a wallet identity. Pure.
pub fn resolve(identity: &WalletIdentity) -> GateDecision {
    match identity {
        WalletIdentity::Connected(address) => GateDecision::Proceed(address.clone()),
        WalletIdentity::Disconnected => GateDecision::Skip,
    }
}

/// Whether an identity change warrants a new aggregation cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleTrigger {
    Noop,
    StartNewCycle,
}

/// Compare the identity of the last cycle with the current one.
///
/// `previous` is `None` before the first cycle has run.
pub fn cycle_trigger(previous: Option<&WalletIdentity>, current: &WalletIdentity) -> CycleTrigger {
    match previous {
        Some(previous) if previous == current => CycleTrigger::Noop,
        _ => CycleTrigger::StartNewCycle,
    }
}
