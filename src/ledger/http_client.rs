//! HTTP client for the ledger query service

use crate::config::{LedgerConfig, ADDRESS_PLACEHOLDER};
use crate::error::{DashboardError, FetchError};
use crate::traits::LedgerService;
use crate::types::CertificateRecord;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::Deserialize;
use std::time::Duration;

/// Standard backend envelope: `{code, message, data, request_id}`
///
/// `code` and `message` are always present; an object without them is
/// not a ledger reply.
#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Vec<CertificateRecord>>,
    #[serde(default)]
    request_id: Option<String>,
}

/// Backend error body: `{code, message, details}`
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    details: Option<String>,
}

/// Ledger query service over HTTP
///
/// # Example
///
/// ```rust,no_run
/// use donor_dashboard::{LedgerConfig, LedgerHttpClient, LedgerService};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = LedgerHttpClient::new(LedgerConfig {
///     base_url: "http://localhost:8080".into(),
///     ..Default::default()
/// })?;
///
/// let records = client.get_donation_history("0x7a1f").await?;
/// # Ok(())
/// # }
/// ```
pub struct LedgerHttpClient {
    config: LedgerConfig,
    client: Client,
}

impl LedgerHttpClient {
    /// Create a new ledger client
    pub fn new(config: LedgerConfig) -> crate::Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref api_key) = config.api_key {
            let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| DashboardError::Config(format!("Invalid API key: {}", e)))?;
            headers.insert(header::AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DashboardError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Donation history URL for an address
    pub fn history_url(&self, address: &str) -> String {
        format!(
            "{}{}",
            self.config.base_url.trim_end_matches('/'),
            self.config
                .history_path
                .replace(ADDRESS_PLACEHOLDER, &urlencoding::encode(address))
        )
    }

    fn decode_history(body: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        match value {
            serde_json::Value::Array(_) => Ok(serde_json::from_value(value)?),
            serde_json::Value::Object(_) => {
                let envelope: ApiEnvelope = serde_json::from_value(value)?;
                tracing::debug!(
                    code = envelope.code,
                    message = %envelope.message,
                    request_id = envelope.request_id.as_deref().unwrap_or("-"),
                    "Decoded ledger envelope"
                );
                Ok(envelope.data.unwrap_or_default())
            }
            other => Err(FetchError::MalformedResponse(format!(
                "expected a list of certificates, got {}",
                other
            ))),
        }
    }

    fn service_message(body: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(ApiErrorBody { message, details: Some(details) }) if !details.is_empty() => {
                format!("{}: {}", message, details)
            }
            Ok(ApiErrorBody { message, .. }) => message,
            Err(_) => body.to_string(),
        }
    }
}

#[async_trait]
impl LedgerService for LedgerHttpClient {
    async fn get_donation_history(&self, address: &str) -> Result<Vec<CertificateRecord>, FetchError> {
        let url = self.history_url(address);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::Service {
                status: status.as_u16(),
                message: Self::service_message(&body),
            });
        }

        Self::decode_history(&body)
    }
}
