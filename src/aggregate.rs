//! Aggregator: summary statistics over a normalized record set

use crate::types::{AggregateSummary, NormalizedRecord};
use rust_decimal::Decimal;

/// Count and total of a record set.
///
/// Every record contributes exactly once; nothing is deduplicated or
/// filtered here.
pub fn aggregate(records: &[NormalizedRecord]) -> AggregateSummary {
    AggregateSummary {
        count: records.len(),
        total_display_amount: records
            .iter()
            .map(|r| r.display_amount)
            .sum::<Decimal>(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::normalize;
    use crate::types::CertificateRecord;
    use std::str::FromStr;

    fn normalized(id: &str, amount: &str) -> NormalizedRecord {
        normalize(CertificateRecord::new(id, format!("p-{}", id), amount)).unwrap()
    }

    #[test]
    fn test_empty_set() {
        let summary = aggregate(&[]);
        assert_eq!(summary, AggregateSummary::default());
        assert_eq!(summary.count, 0);
        assert!(summary.total_display_amount.is_zero());
        assert_eq!(aggregate(&[]), summary);
    }

    #[test]
    fn test_two_donations() {
        let records = vec![normalized("c1", "2500000000"), normalized("c2", "1000000000")];
        let summary = aggregate(&records);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_display_amount, Decimal::from_str("3.5").unwrap());
    }

    #[test]
    fn test_order_independent() {
        let records = vec![
            normalized("c1", "1"),
            normalized("c2", "333333333"),
            normalized("c3", "18446744073709551615"),
            normalized("c4", "0"),
        ];
        let expected = aggregate(&records);

        let mut reversed = records.clone();
        reversed.reverse();
        assert_eq!(aggregate(&reversed), expected);

        let mut rotated = records.clone();
        rotated.rotate_left(2);
        assert_eq!(aggregate(&rotated), expected);
    }

    #[test]
    fn test_duplicates_are_counted() {
        let record = normalized("c1", "1000000000");
        let summary = aggregate(&[record.clone(), record]);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_display_amount, Decimal::from(2));
    }
}
