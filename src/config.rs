//! Dashboard configuration
//!
//! Loaded from TOML; every field has a default so a partial file (or no
//! file at all) is valid.

use crate::amount::{MalformedAmountPolicy, DISPLAY_SCALE};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder substituted with the wallet address in `history_path`
pub const ADDRESS_PLACEHOLDER: &str = "{address}";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub presentation: PresentationConfig,
    #[serde(default)]
    pub malformed_amounts: MalformedAmountPolicy,
}

/// Ledger query service endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Base URL of the ledger API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Donation history route, relative to `base_url`
    #[serde(default = "default_history_path")]
    pub history_path: String,

    /// Optional bearer token
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            history_path: default_history_path(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Display rules for the view model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Characters of an identifier kept in compact display
    #[serde(default = "default_id_prefix_len")]
    pub id_prefix_len: usize,

    /// Decimal places for per-certificate amounts
    #[serde(default = "default_amount_decimals")]
    pub amount_decimals: u32,

    /// Decimal places for the summary total
    #[serde(default = "default_total_decimals")]
    pub total_decimals: u32,

    /// Display unit label
    #[serde(default = "default_unit_symbol")]
    pub unit_symbol: String,

    /// Route prefix for project detail references
    #[serde(default = "default_project_route")]
    pub project_route: String,

    /// Message shown whenever a cycle fails
    #[serde(default = "default_failure_message")]
    pub failure_message: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            id_prefix_len: default_id_prefix_len(),
            amount_decimals: default_amount_decimals(),
            total_decimals: default_total_decimals(),
            unit_symbol: default_unit_symbol(),
            project_route: default_project_route(),
            failure_message: default_failure_message(),
        }
    }
}

// Defaults
fn default_base_url() -> String { "http://localhost:8080".to_string() }
fn default_history_path() -> String { "/api/v1/donations/{address}".to_string() }
fn default_timeout_secs() -> u64 { 30 }
fn default_id_prefix_len() -> usize { 12 }
fn default_amount_decimals() -> u32 { 4 }
fn default_total_decimals() -> u32 { 2 }
fn default_unit_symbol() -> String { "SUI".to_string() }
fn default_project_route() -> String { "/project".to_string() }
fn default_failure_message() -> String { "Unable to load donation history".to_string() }

impl DashboardConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DashboardError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ledger.base_url.trim().is_empty() {
            return Err(DashboardError::Config("ledger.base_url cannot be empty".into()));
        }
        if !self.ledger.history_path.contains(ADDRESS_PLACEHOLDER) {
            return Err(DashboardError::Config(format!(
                "ledger.history_path must contain {}",
                ADDRESS_PLACEHOLDER
            )));
        }
        if self.ledger.timeout_secs == 0 {
            return Err(DashboardError::Config("ledger.timeout_secs must be positive".into()));
        }
        let presentation = &self.presentation;
        if presentation.id_prefix_len == 0 {
            return Err(DashboardError::Config("presentation.id_prefix_len must be positive".into()));
        }
        if presentation.amount_decimals > DISPLAY_SCALE || presentation.total_decimals > DISPLAY_SCALE {
            return Err(DashboardError::Config(format!(
                "presentation decimals cannot exceed {}",
                DISPLAY_SCALE
            )));
        }
        Ok(())
    }
}
