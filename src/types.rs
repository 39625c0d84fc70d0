//! Core data model: identities, certificate records and summaries

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Wallet connection state as reported by the identity provider.
///
/// The address is opaque to this crate; it is handed to the ledger
/// service untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "address", rename_all = "snake_case")]
pub enum WalletIdentity {
    Connected(String),
    #[default]
    Disconnected,
}

impl WalletIdentity {
    pub fn connected(address: impl Into<String>) -> Self {
        Self::Connected(address.into())
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Self::Connected(address) => Some(address),
            Self::Disconnected => None,
        }
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected(_))
    }
}

impl From<Option<String>> for WalletIdentity {
    fn from(address: Option<String>) -> Self {
        address.map_or(Self::Disconnected, Self::Connected)
    }
}

/// One donation certificate as returned by the ledger service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Minted certificate token ID
    #[serde(rename = "id")]
    pub certificate_id: String,
    /// Funded project ID
    pub project_id: String,
    /// Amount in the ledger's smallest unit, as an integer string
    #[serde(rename = "amount", deserialize_with = "deserialize_raw_amount")]
    pub raw_amount: String,
}

impl CertificateRecord {
    pub fn new(
        certificate_id: impl Into<String>,
        project_id: impl Into<String>,
        raw_amount: impl Into<String>,
    ) -> Self {
        Self {
            certificate_id: certificate_id.into(),
            project_id: project_id.into(),
            raw_amount: raw_amount.into(),
        }
    }
}

/// Accepts the amount as a JSON string or a JSON number.
///
/// Numbers keep their textual form so the normalizer can reject
/// fractional or negative values. Missing and null amounts fail here,
/// which turns them into a malformed response rather than a zero.
fn deserialize_raw_amount<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Ok(text),
        serde_json::Value::Number(number) => Ok(number.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected amount as string or number, got {}",
            other
        ))),
    }
}

/// A certificate with its amount converted to the display unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub record: CertificateRecord,
    /// `raw_amount / 10^9`, exact and unrounded
    pub display_amount: Decimal,
}

impl NormalizedRecord {
    pub fn certificate_id(&self) -> &str {
        &self.record.certificate_id
    }

    pub fn project_id(&self) -> &str {
        &self.record.project_id
    }
}

/// Derived statistics over one cycle's record set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    pub count: usize,
    pub total_display_amount: Decimal,
}
