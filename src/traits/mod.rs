//! Collaborator traits
//!
//! The two capabilities the core consumes from its surroundings: a
//! wallet-identity provider and a ledger query service.

mod identity;
mod ledger;

pub use identity::WalletIdentityProvider;
pub use ledger::LedgerService;
