//! Receipt fetcher

use crate::error::FetchError;
use crate::traits::LedgerService;
use crate::types::CertificateRecord;

/// Issues exactly one ledger query per call and classifies its failure.
///
/// There is no retry loop here; a failed fetch is reported once and the
/// caller decides whether to run another cycle.
pub struct ReceiptFetcher<L> {
    ledger: L,
}

impl<L: LedgerService> ReceiptFetcher<L> {
    pub fn new(ledger: L) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Certificates held by `address`, in the order the ledger returned them.
    ///
    /// The address is passed through unvalidated.
    pub async fn fetch(&self, address: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        tracing::debug!(address = %address, "Fetching donation history");

        match self.ledger.get_donation_history(address).await {
            Ok(records) => {
                tracing::debug!(address = %address, count = records.len(), "Donation history fetched");
                Ok(records)
            }
            Err(e) => {
                tracing::error!(
                    address = %address,
                    error = %e,
                    transient = e.is_transient(),
                    "Failed to fetch donation history"
                );
                Err(e)
            }
        }
    }
}
