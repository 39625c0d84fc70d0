//! Mock ledger service for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Notify;

use crate::error::FetchError;
use crate::traits::LedgerService;
use crate::types::CertificateRecord;

#[derive(Debug, Clone)]
enum MockReply {
    Records(Vec<CertificateRecord>),
    Fail(FetchError),
}

/// Mock ledger for testing.
///
/// Scripted per-address replies, call recording, and held responses for
/// exercising out-of-order completion. Unknown addresses have an empty
/// history.
#[derive(Default)]
pub struct MockLedger {
    replies: Mutex<HashMap<String, MockReply>>,
    holds: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
}

/// Keeps the next query for an address pending until released.
#[derive(Debug, Clone)]
pub struct LedgerHold {
    notify: Arc<Notify>,
}

impl LedgerHold {
    /// Let the held query complete. Safe to call before the query starts.
    pub fn release(&self) {
        self.notify.notify_one();
    }
}

impl MockLedger {
    /// Create a new mock ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the history returned for an address.
    pub fn with_history(self, address: impl Into<String>, records: Vec<CertificateRecord>) -> Self {
        self.set_history(address, records);
        self
    }

    /// Make queries for an address fail.
    pub fn with_failure(self, address: impl Into<String>, error: FetchError) -> Self {
        self.set_failure(address, error);
        self
    }

    pub fn set_history(&self, address: impl Into<String>, records: Vec<CertificateRecord>) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), MockReply::Records(records));
    }

    pub fn set_failure(&self, address: impl Into<String>, error: FetchError) {
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), MockReply::Fail(error));
    }

    /// Hold the next query for `address` until the returned handle is released.
    pub fn hold(&self, address: impl Into<String>) -> LedgerHold {
        let notify = Arc::new(Notify::new());
        self.holds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(address.into(), notify.clone());
        LedgerHold { notify }
    }

    /// Get the number of queries received.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Addresses queried, in arrival order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait]
impl LedgerService for MockLedger {
    async fn get_donation_history(&self, address: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(address.to_string());

        let hold = self
            .holds
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(address);
        if let Some(notify) = hold {
            notify.notified().await;
        }

        let reply = self
            .replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(address)
            .cloned();

        match reply {
            Some(MockReply::Records(records)) => Ok(records),
            Some(MockReply::Fail(error)) => Err(error),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_ledger() {
        let ledger = MockLedger::new()
            .with_history("0xA", vec![CertificateRecord::new("c1", "p1", "5")])
            .with_failure("0xB", FetchError::Service { status: 500, message: "boom".into() });

        assert_eq!(ledger.get_donation_history("0xA").await.unwrap().len(), 1);
        assert!(ledger.get_donation_history("0xB").await.is_err());
        assert!(ledger.get_donation_history("0xC").await.unwrap().is_empty());
        assert_eq!(ledger.calls(), vec!["0xA", "0xB", "0xC"]);
    }

    #[tokio::test]
    async fn test_hold_released_early() {
        let ledger = MockLedger::new().with_history("0xA", vec![]);
        let hold = ledger.hold("0xA");
        hold.release();

        assert!(ledger.get_donation_history("0xA").await.is_ok());
        // The hold is consumed by the first query
        assert!(ledger.get_donation_history("0xA").await.is_ok());
        assert_eq!(ledger.call_count(), 2);
    }
}
