//! The period aggregation loop.

use std::collections::BTreeMap;

use praxis_shared::ProvisionSign;
use rust_decimal::Decimal;
use tracing::warn;

use super::source::TransactionSource;
use super::types::{AggregationOutcome, DailyBucket, PeriodSummary};

/// Buckets a transaction source by calendar day and maintains the running
/// WIP balance.
pub struct PeriodAggregator;

impl PeriodAggregator {
    /// Aggregates a source into daily buckets and a window summary.
    ///
    /// Distinct dates are walked ascending. Each day's totals are folded
    /// into the cumulative balance; that day's `wip_balance` is the value
    /// after its delta is applied. With no buckets, `current_wip_balance`
    /// is the opening balance unchanged.
    ///
    /// Deterministic and stateless: identical inputs produce identical
    /// output.
    #[must_use]
    pub fn aggregate<S: TransactionSource>(
        source: &S,
        opening_balance: Decimal,
        provision_sign: ProvisionSign,
    ) -> AggregationOutcome {
        let mut daily_totals = BTreeMap::new();
        let stats = source.fold_daily(&mut daily_totals);

        if stats.uncategorized_count > 0 {
            warn!(
                count = stats.uncategorized_count,
                "uncategorized transactions excluded from aggregation"
            );
        }

        let mut summary = PeriodSummary::default();
        let mut cumulative_balance = opening_balance;
        let mut daily_buckets = Vec::with_capacity(daily_totals.len());

        for (date, totals) in &daily_totals {
            cumulative_balance += totals.wip_delta(provision_sign);

            summary.total_production += totals.production;
            summary.total_adjustments += totals.adjustments;
            summary.total_disbursements += totals.disbursements;
            summary.total_billing += totals.billing;
            summary.total_provisions += totals.provisions;

            daily_buckets.push(DailyBucket::from_totals(*date, totals, cumulative_balance));
        }

        summary.current_wip_balance = cumulative_balance;

        AggregationOutcome {
            daily_buckets,
            summary,
            uncategorized_count: stats.uncategorized_count,
        }
    }
}
