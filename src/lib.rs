//! Donor Dashboard - donation certificate aggregation core
//!
//! Turns a wallet identity into a consolidated view of the donation
//! certificates that wallet holds on the ledger.
//!
//! # Pipeline
//!
//! Each aggregation cycle runs:
//! - **Identity gate**: no wallet, no query ([`identity::resolve`])
//! - **Receipt fetcher**: one ledger query per cycle ([`ReceiptFetcher`])
//! - **Unit normalizer**: MIST -> SUI, exact ([`amount::normalize`])
//! - **Aggregator**: count and total ([`aggregate::aggregate`])
//! - **Presentation adapter**: the [`ViewModel`] ([`presentation::present`])
//!
//! [`Dashboard`] owns the current view and discards results of cycles
//! that were superseded by a newer identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use donor_dashboard::{Dashboard, DashboardConfig, LedgerHttpClient, WalletIdentity};
//!
//! let config = DashboardConfig::load("dashboard.toml")?;
//! let dashboard = Dashboard::new(LedgerHttpClient::new(config.ledger.clone())?, config);
//!
//! dashboard.identity_changed(WalletIdentity::connected("0x7a1f...")).await;
//! match dashboard.view().await {
//!     ViewModel::Populated(view) => println!("{}", view.summary.total_display),
//!     other => println!("{}", other.state_name()),
//! }
//! ```

// Collaborator traits
pub mod traits;

// Data model
pub mod types;

// Identity gate, cycle trigger, wallet session
pub mod identity;

// Receipt fetcher and ledger clients
pub mod ledger;

// Unit normalizer
pub mod amount;

// Aggregator
pub mod aggregate;

// View model
pub mod presentation;

// Cycle orchestration
pub mod dashboard;

// Configuration
pub mod config;

// Error types
pub mod error;

pub use traits::{LedgerService, WalletIdentityProvider};

pub use types::{AggregateSummary, CertificateRecord, NormalizedRecord, WalletIdentity};

pub use identity::{CycleTrigger, GateDecision, WalletSession};

pub use ledger::{LedgerHold, MockLedger, ReceiptFetcher};

#[cfg(feature = "client")]
pub use ledger::LedgerHttpClient;

pub use amount::{MalformedAmountPolicy, NormalizedBatch, SkippedRecord};

pub use presentation::{PopulatedView, RecordRow, SummaryView, ViewModel};

pub use dashboard::{CycleOutcome, CycleTicket, Dashboard};

pub use config::{DashboardConfig, LedgerConfig, PresentationConfig};

pub use error::{AmountError, DashboardError, FetchError, Result};
