//! Ledger access: the receipt fetcher and ledger service implementations

mod fetcher;
#[cfg(feature = "client")]
mod http_client;
mod mock;

pub use fetcher::ReceiptFetcher;
#[cfg(feature = "client")]
pub use http_client::LedgerHttpClient;
pub use mock::{LedgerHold, MockLedger};
