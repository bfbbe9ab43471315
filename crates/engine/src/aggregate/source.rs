//! Polymorphic aggregation inputs.
//!
//! Two input shapes feed the aggregation loop: individual ledger rows, and
//! `(date, type_code)` sums the data layer grouped already. Pre-grouped
//! input is preferred whenever the caller does not need subtype detail,
//! since it pushes the heavy lifting into the database.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{GroupedDailyAmount, LedgerTransaction};
use crate::category::{CategoryTotals, TransactionCategorizer};

/// Counts observed while folding a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldStats {
    /// Rows (or grouped rows) folded.
    pub transaction_count: u64,
    /// Rows excluded from every bucket by the categorizer.
    pub uncategorized_count: u64,
}

/// An input shape that can fold itself into per-date category totals.
pub trait TransactionSource {
    /// Folds every row into `totals`, returning fold counts.
    ///
    /// `BTreeMap` keeps dates sorted, so the aggregator walks them in
    /// chronological order for free.
    fn fold_daily(&self, totals: &mut BTreeMap<NaiveDate, CategoryTotals>) -> FoldStats;
}

/// Row-level input: individual transactions, grouped internally by date.
#[derive(Debug, Clone, Copy)]
pub struct RowSource<'a>(pub &'a [LedgerTransaction]);

impl TransactionSource for RowSource<'_> {
    fn fold_daily(&self, totals: &mut BTreeMap<NaiveDate, CategoryTotals>) -> FoldStats {
        let mut stats = FoldStats::default();
        for tx in self.0 {
            stats.transaction_count += 1;
            let category =
                TransactionCategorizer::categorize(&tx.type_code, tx.subtype_code.as_deref());
            let day = totals.entry(tx.date).or_default();
            if !day.apply(category, tx.amount) {
                stats.uncategorized_count += 1;
            }
        }
        stats
    }
}

/// Pre-grouped input: `(date, type_code)` sums from the data layer.
///
/// Subtype detail is gone at this granularity, so categorization runs on
/// the type code alone. That is the documented contract for grouped input.
#[derive(Debug, Clone, Copy)]
pub struct GroupedSource<'a>(pub &'a [GroupedDailyAmount]);

impl TransactionSource for GroupedSource<'_> {
    fn fold_daily(&self, totals: &mut BTreeMap<NaiveDate, CategoryTotals>) -> FoldStats {
        let mut stats = FoldStats::default();
        for row in self.0 {
            stats.transaction_count += 1;
            let category = TransactionCategorizer::categorize(&row.type_code, None);
            let day = totals.entry(row.date).or_default();
            if !day.apply(category, row.amount) {
                stats.uncategorized_count += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tx(day: NaiveDate, type_code: &str, amount: Decimal) -> LedgerTransaction {
        LedgerTransaction {
            owner_key: "T-1".to_string(),
            date: day,
            type_code: type_code.to_string(),
            subtype_code: None,
            amount,
            cost: None,
            hours: None,
            employee_code: None,
        }
    }

    #[test]
    fn test_row_source_groups_by_date() {
        let d1 = date(2024, 1, 1);
        let d2 = date(2024, 1, 2);
        let rows = vec![
            tx(d1, "TIME", dec!(100)),
            tx(d1, "TIME", dec!(50)),
            tx(d2, "FEE", dec!(-40)),
        ];

        let mut totals = BTreeMap::new();
        let stats = RowSource(&rows).fold_daily(&mut totals);

        assert_eq!(stats.transaction_count, 3);
        assert_eq!(stats.uncategorized_count, 0);
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[&d1].production, dec!(150));
        assert_eq!(totals[&d2].billing, dec!(40));
    }

    #[test]
    fn test_row_source_uses_subtype() {
        let d1 = date(2024, 1, 1);
        let mut row = tx(d1, "TIME", dec!(-30));
        row.subtype_code = Some("WOFF".to_string());

        let mut totals = BTreeMap::new();
        RowSource(std::slice::from_ref(&row)).fold_daily(&mut totals);

        assert_eq!(totals[&d1].adjustments, dec!(-30));
        assert_eq!(totals[&d1].production, Decimal::ZERO);
    }

    #[test]
    fn test_row_source_counts_uncategorized() {
        let rows = vec![tx(date(2024, 1, 1), "MYSTERY", dec!(77))];
        let mut totals = BTreeMap::new();
        let stats = RowSource(&rows).fold_daily(&mut totals);

        assert_eq!(stats.uncategorized_count, 1);
        assert!(totals[&date(2024, 1, 1)].is_zero());
    }

    #[test]
    fn test_grouped_source_matches_row_source_without_subtypes() {
        let d1 = date(2024, 1, 1);
        let rows = vec![tx(d1, "TIME", dec!(100)), tx(d1, "FEE", dec!(-40))];
        let grouped = vec![
            GroupedDailyAmount {
                date: d1,
                type_code: "TIME".to_string(),
                amount: dec!(100),
            },
            GroupedDailyAmount {
                date: d1,
                type_code: "FEE".to_string(),
                amount: dec!(-40),
            },
        ];

        let mut from_rows = BTreeMap::new();
        RowSource(&rows).fold_daily(&mut from_rows);
        let mut from_grouped = BTreeMap::new();
        GroupedSource(&grouped).fold_daily(&mut from_grouped);

        assert_eq!(from_rows, from_grouped);
    }
}
