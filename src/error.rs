//! Error types for the donor dashboard core

use thiserror::Error;

/// Result type for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Failure of a single ledger query.
///
/// Surfaced once per invocation; the core never retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The ledger service answered with an error status
    #[error("Ledger service error {status}: {message}")]
    Service { status: u16, message: String },

    /// The response could not be decoded into certificate records
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Whether a later attempt could plausibly succeed.
    ///
    /// Informational only; retry policy belongs to the caller.
    pub fn is_transient(&self) -> bool {
        match self {
            FetchError::Transport(_) => true,
            FetchError::Service { status, .. } => *status >= 500 || *status == 429,
            FetchError::MalformedResponse(_) => false,
        }
    }
}

#[cfg(feature = "client")]
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Service {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}

/// Why a raw ledger amount could not be normalized
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount {0:?} is not a non-negative integer")]
    NotAnInteger(String),

    #[error("amount {0} exceeds the supported range")]
    OutOfRange(String),
}

/// Dashboard error types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    /// Ledger query failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A certificate carried an amount that could not be normalized
    #[error("Malformed amount on certificate {certificate_id}: {source}")]
    MalformedAmount {
        certificate_id: String,
        #[source]
        source: AmountError,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        DashboardError::Config(err.to_string())
    }
}
