//! View model handed to the presentation layer

use rust_decimal::Decimal;
use serde::Serialize;

/// The dashboard's one and only view state.
///
/// Exactly one variant holds at a time, so combinations such as
/// "loading with an error" cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewModel {
    /// No wallet connected
    Unauthenticated,
    /// A cycle is in flight
    Loading,
    /// The cycle failed; `message` is stable and user-facing
    Failed { message: String },
    /// The wallet holds no certificates
    Empty { skipped_records: usize },
    Populated(PopulatedView),
}

impl ViewModel {
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated(_))
    }

    pub fn populated(&self) -> Option<&PopulatedView> {
        match self {
            Self::Populated(view) => Some(view),
            _ => None,
        }
    }

    /// Short state name, for logging
    pub fn state_name(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Loading => "loading",
            Self::Failed { .. } => "failed",
            Self::Empty { .. } => "empty",
            Self::Populated(_) => "populated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatedView {
    /// Full wallet address the view was computed for
    pub address: String,
    pub summary: SummaryView,
    pub rows: Vec<RecordRow>,
    /// Certificates left out because their amount was malformed
    pub skipped_records: usize,
}

/// Summary cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryView {
    /// One certificate per donation
    pub certificate_count: usize,
    pub total_amount: Decimal,
    /// e.g. "3.50 SUI"
    pub total_display: String,
}

/// One table row per certificate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub certificate_id: String,
    pub certificate_id_short: String,
    /// Untruncated; this is the navigation target
    pub project_id: String,
    pub project_id_short: String,
    pub project_href: String,
    pub amount: Decimal,
    /// e.g. "2.5000 SUI"
    pub amount_display: String,
}
