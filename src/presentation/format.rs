//! Display formatting helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Marker appended to shortened identifiers
pub const ELLIPSIS: &str = "...";

/// Format with exactly `decimals` fractional digits, rounding half away
/// from zero.
pub fn format_amount(amount: Decimal, decimals: u32) -> String {
    let mut rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded.to_string()
}

/// Keep the first `prefix_len` characters of an identifier.
///
/// Identifiers that already fit are returned unchanged.
pub fn truncate_id(id: &str, prefix_len: usize) -> String {
    match id.char_indices().nth(prefix_len) {
        Some((cut, _)) => format!("{}{}", &id[..cut], ELLIPSIS),
        None => id.to_string(),
    }
}
