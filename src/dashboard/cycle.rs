//! Cycle bookkeeping

use crate::presentation::ViewModel;
use crate::types::WalletIdentity;

/// Handle for one aggregation cycle.
///
/// Issued when the cycle begins; its generation is compared against the
/// dashboard's current generation when the result is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleTicket {
    pub(crate) generation: u64,
    pub(crate) identity: WalletIdentity,
}

impl CycleTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn identity(&self) -> &WalletIdentity {
        &self.identity
    }
}

/// What happened to a cycle's result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The view was written to the current-view slot
    Committed(ViewModel),
    /// A newer cycle began first; the result was dropped
    Superseded,
}

impl CycleOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// The single mutable slot behind the dashboard
#[derive(Debug)]
pub(crate) struct ViewSlot {
    pub(crate) generation: u64,
    /// Identity of the most recently begun cycle
    pub(crate) identity: Option<WalletIdentity>,
    pub(crate) view: ViewModel,
}

impl Default for ViewSlot {
    fn default() -> Self {
        Self {
            generation: 0,
            identity: None,
            view: ViewModel::Loading,
        }
    }
}
