//! Property tests for categorization and aggregation.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use praxis_shared::ProvisionSign;

use super::aggregator::PeriodAggregator;
use super::opening::OpeningBalanceReconstructor;
use super::source::RowSource;
use super::types::{LedgerTransaction, TypeCodeSum};
use crate::category::{Category, TransactionCategorizer};

/// Type codes the rule table knows, plus ones it does not.
const TYPE_CODES: &[&str] = &[
    "TIME", "DISB", "EXP", "FEE", "INV", "ADJ", "WIPADJ", "PROV", "MYSTERY", "ZZZ",
];

const SUBTYPE_CODES: &[&str] = &["WOFF", "WON", "CRN", "STD", "OVERTIME"];

fn type_code_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(TYPE_CODES).prop_map(str::to_string)
}

fn subtype_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::sample::select(SUBTYPE_CODES).prop_map(str::to_string))
}

fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (-1_000_000i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0u64..730).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(offset))
            .unwrap()
    })
}

fn transaction_strategy() -> impl Strategy<Value = LedgerTransaction> {
    (
        date_strategy(),
        type_code_strategy(),
        subtype_strategy(),
        amount_strategy(),
    )
        .prop_map(|(date, type_code, subtype_code, amount)| LedgerTransaction {
            owner_key: "T-1".to_string(),
            date,
            type_code,
            subtype_code,
            amount,
            cost: None,
            hours: None,
            employee_code: None,
        })
}

fn transactions_strategy(max_len: usize) -> impl Strategy<Value = Vec<LedgerTransaction>> {
    prop::collection::vec(transaction_strategy(), 0..=max_len)
}

/// Like `transactions_strategy`, but without subtypes, matching what the
/// data layer's `(type_code, sum)` grouping can represent.
fn subtype_free_transactions(max_len: usize) -> impl Strategy<Value = Vec<LedgerTransaction>> {
    transactions_strategy(max_len).prop_map(|mut txs| {
        for tx in &mut txs {
            tx.subtype_code = None;
        }
        txs
    })
}

/// Simulates the data layer's GROUP BY type_code over pre-window rows.
fn group_sums_by_type(transactions: &[LedgerTransaction]) -> Vec<TypeCodeSum> {
    let mut sums: BTreeMap<String, Decimal> = BTreeMap::new();
    for tx in transactions {
        *sums.entry(tx.type_code.clone()).or_default() += tx.amount;
    }
    sums.into_iter()
        .map(|(type_code, amount)| TypeCodeSum { type_code, amount })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Categorization is a partition: every input lands in exactly one of
    /// the six categories, and per-category counts sum to the total.
    #[test]
    fn prop_categorization_is_a_partition(
        transactions in transactions_strategy(50),
    ) {
        let mut counts: HashMap<Category, usize> = HashMap::new();
        for tx in &transactions {
            let category =
                TransactionCategorizer::categorize(&tx.type_code, tx.subtype_code.as_deref());
            prop_assert!(Category::ALL.contains(&category));
            *counts.entry(category).or_default() += 1;
        }

        let total: usize = counts.values().sum();
        prop_assert_eq!(total, transactions.len());
    }

    /// Opening balance from grouped sums equals a full replay of every
    /// pre-window row through the same category fold.
    #[test]
    fn prop_grouped_opening_balance_equals_row_replay(
        transactions in subtype_free_transactions(60),
    ) {
        let grouped = group_sums_by_type(&transactions);
        let from_groups =
            OpeningBalanceReconstructor::reconstruct(&grouped, ProvisionSign::Subtract);

        let replay = PeriodAggregator::aggregate(
            &RowSource(&transactions),
            Decimal::ZERO,
            ProvisionSign::Subtract,
        );

        prop_assert_eq!(from_groups, replay.summary.current_wip_balance);
    }

    /// Splitting any transaction set at an arbitrary date and chaining the
    /// closing balance into the second window reproduces the unsplit run.
    #[test]
    fn prop_balance_continuity_across_split(
        transactions in transactions_strategy(60),
        split_offset in 0u64..730,
        opening in amount_strategy(),
    ) {
        let split = NaiveDate::from_ymd_opt(2023, 1, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(split_offset))
            .unwrap();

        let before: Vec<LedgerTransaction> =
            transactions.iter().filter(|tx| tx.date <= split).cloned().collect();
        let after: Vec<LedgerTransaction> =
            transactions.iter().filter(|tx| tx.date > split).cloned().collect();

        let first = PeriodAggregator::aggregate(
            &RowSource(&before),
            opening,
            ProvisionSign::Subtract,
        );
        let second = PeriodAggregator::aggregate(
            &RowSource(&after),
            first.summary.current_wip_balance,
            ProvisionSign::Subtract,
        );
        let full = PeriodAggregator::aggregate(
            &RowSource(&transactions),
            opening,
            ProvisionSign::Subtract,
        );

        prop_assert_eq!(
            second.summary.current_wip_balance,
            full.summary.current_wip_balance,
            "chained windows must end where the unsplit run ends"
        );
    }

    /// Re-running aggregation over unchanged input yields identical output.
    #[test]
    fn prop_aggregation_is_idempotent(
        transactions in transactions_strategy(40),
        opening in amount_strategy(),
    ) {
        let first = PeriodAggregator::aggregate(
            &RowSource(&transactions),
            opening,
            ProvisionSign::Subtract,
        );
        let second = PeriodAggregator::aggregate(
            &RowSource(&transactions),
            opening,
            ProvisionSign::Subtract,
        );

        prop_assert_eq!(first, second);
    }

    /// The window summary totals equal the sums of the daily buckets.
    #[test]
    fn prop_summary_totals_match_bucket_sums(
        transactions in transactions_strategy(40),
    ) {
        let outcome = PeriodAggregator::aggregate(
            &RowSource(&transactions),
            Decimal::ZERO,
            ProvisionSign::Subtract,
        );

        let production: Decimal =
            outcome.daily_buckets.iter().map(|b| b.production).sum();
        let billing: Decimal = outcome.daily_buckets.iter().map(|b| b.billing).sum();
        let provisions: Decimal =
            outcome.daily_buckets.iter().map(|b| b.provisions).sum();

        prop_assert_eq!(production, outcome.summary.total_production);
        prop_assert_eq!(billing, outcome.summary.total_billing);
        prop_assert_eq!(provisions, outcome.summary.total_provisions);
    }
}
