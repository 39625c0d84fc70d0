//! Ledger query service trait

use crate::error::FetchError;
use crate::types::CertificateRecord;
use async_trait::async_trait;
use std::sync::Arc;

/// Remote system of record for donation certificates.
///
/// # Example
///
/// ```rust,ignore
/// use donor_dashboard::{CertificateRecord, FetchError, LedgerService};
///
/// struct FixedLedger(Vec<CertificateRecord>);
///
/// #[async_trait]
/// impl LedgerService for FixedLedger {
///     async fn get_donation_history(&self, _address: &str) -> Result<Vec<CertificateRecord>, FetchError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait LedgerService: Send + Sync {
    /// Certificates currently held by `address`, in ledger order
    async fn get_donation_history(&self, address: &str) -> Result<Vec<CertificateRecord>, FetchError>;
}

#[async_trait]
impl<T: LedgerService + ?Sized> LedgerService for Arc<T> {
    async fn get_donation_history(&self, address: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        (**self).get_donation_history(address).await
    }
}
