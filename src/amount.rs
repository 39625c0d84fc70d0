//! Unit normalizer
//!
//! Converts ledger-native integer amounts (MIST) into the display unit
//! (SUI) with exact decimal arithmetic. Rounding happens only at
//! presentation time.

use crate::error::{AmountError, DashboardError, Result};
use crate::types::{CertificateRecord, NormalizedRecord};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Decimal places between the ledger unit and the display unit
pub const DISPLAY_SCALE: u32 = 9;

/// Ledger units per display unit (10^9)
pub const RAW_UNITS_PER_DISPLAY_UNIT: u64 = 1_000_000_000;

/// What to do with a certificate whose amount cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedAmountPolicy {
    /// The whole cycle fails and the view shows the failure state
    #[default]
    FailCycle,
    /// The record is dropped, counted, and reported in the view
    SkipRecord,
}

/// A certificate left out under [`MalformedAmountPolicy::SkipRecord`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub record: CertificateRecord,
    pub reason: AmountError,
}

/// Normalized records of one cycle plus whatever was skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedBatch {
    pub records: Vec<NormalizedRecord>,
    pub skipped: Vec<SkippedRecord>,
}

/// Parse a ledger amount: ASCII digits only, no sign, no whitespace.
pub fn parse_raw_amount(raw: &str) -> std::result::Result<u64, AmountError> {
    if raw.is_empty() {
        return Err(AmountError::Empty);
    }
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::NotAnInteger(raw.to_string()));
    }
    raw.parse::<u64>()
        .map_err(|_| AmountError::OutOfRange(raw.to_string()))
}

/// Exact `raw / 10^9`
pub fn to_display_amount(raw: u64) -> std::result::Result<Decimal, AmountError> {
    Decimal::try_from_i128_with_scale(i128::from(raw), DISPLAY_SCALE)
        .map_err(|_| AmountError::OutOfRange(raw.to_string()))
}

/// Normalize a single certificate
pub fn normalize(record: CertificateRecord) -> Result<NormalizedRecord> {
    match parse_raw_amount(&record.raw_amount).and_then(to_display_amount) {
        Ok(display_amount) => Ok(NormalizedRecord {
            record,
            display_amount,
        }),
        Err(source) => Err(DashboardError::MalformedAmount {
            certificate_id: record.certificate_id,
            source,
        }),
    }
}

/// Normalize a record set, preserving order.
///
/// Under `FailCycle` the first malformed amount aborts the batch.
pub fn normalize_all(
    records: Vec<CertificateRecord>,
    policy: MalformedAmountPolicy,
) -> Result<NormalizedBatch> {
    let mut batch = NormalizedBatch {
        records: Vec::with_capacity(records.len()),
        skipped: Vec::new(),
    };

    for record in records {
        let parsed = parse_raw_amount(&record.raw_amount).and_then(to_display_amount);
        match (parsed, policy) {
            (Ok(display_amount), _) => batch.records.push(NormalizedRecord {
                record,
                display_amount,
            }),
            (Err(reason), MalformedAmountPolicy::SkipRecord) => {
                tracing::warn!(
                    certificate_id = %record.certificate_id,
                    error = %reason,
                    "Skipping certificate with malformed amount"
                );
                batch.skipped.push(SkippedRecord { record, reason });
            }
            (Err(source), MalformedAmountPolicy::FailCycle) => {
                return Err(DashboardError::MalformedAmount {
                    certificate_id: record.certificate_id,
                    source,
                });
            }
        }
    }

    Ok(batch)
}
