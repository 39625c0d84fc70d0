//! Presentation adapter
//!
//! Maps one cycle's results onto the [`ViewModel`]. Deterministic and
//! side-effect free: nothing here fetches or re-normalizes.

mod format;
mod view;

pub use format::{format_amount, truncate_id, ELLIPSIS};
pub use view::{PopulatedView, RecordRow, SummaryView, ViewModel};

use crate::amount::NormalizedBatch;
use crate::config::PresentationConfig;
use crate::error::DashboardError;
use crate::types::{AggregateSummary, NormalizedRecord, WalletIdentity};

/// Build the view for one cycle.
///
/// Precedence: `Unauthenticated` > `Failed` > `Empty` > `Populated`.
pub fn present(
    identity: &WalletIdentity,
    summary: &AggregateSummary,
    batch: &NormalizedBatch,
    error: Option<&DashboardError>,
    config: &PresentationConfig,
) -> ViewModel {
    let address = match identity {
        WalletIdentity::Disconnected => return ViewModel::Unauthenticated,
        WalletIdentity::Connected(address) => address,
    };

    if error.is_some() {
        return ViewModel::Failed {
            message: config.failure_message.clone(),
        };
    }

    if batch.records.is_empty() {
        return ViewModel::Empty {
            skipped_records: batch.skipped.len(),
        };
    }

    ViewModel::Populated(PopulatedView {
        address: address.clone(),
        summary: SummaryView {
            certificate_count: summary.count,
            total_amount: summary.total_display_amount,
            total_display: with_unit(
                format_amount(summary.total_display_amount, config.total_decimals),
                config,
            ),
        },
        rows: batch.records.iter().map(|r| row(r, config)).collect(),
        skipped_records: batch.skipped.len(),
    })
}

fn row(record: &NormalizedRecord, config: &PresentationConfig) -> RecordRow {
    RecordRow {
        certificate_id: record.certificate_id().to_string(),
        certificate_id_short: truncate_id(record.certificate_id(), config.id_prefix_len),
        project_id: record.project_id().to_string(),
        project_id_short: truncate_id(record.project_id(), config.id_prefix_len),
        project_href: format!(
            "{}/{}",
            config.project_route.trim_end_matches('/'),
            record.project_id()
        ),
        amount: record.display_amount,
        amount_display: with_unit(
            format_amount(record.display_amount, config.amount_decimals),
            config,
        ),
    }
}

fn with_unit(amount: String, config: &PresentationConfig) -> String {
    if config.unit_symbol.is_empty() {
        amount
    } else {
        format!("{} {}", amount, config.unit_symbol)
    }
}
