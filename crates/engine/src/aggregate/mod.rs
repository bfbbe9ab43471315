//! Period aggregation, opening-balance reconstruction, and profitability
//! metrics.
//!
//! The aggregation loop exists exactly once: both row-level transactions and
//! pre-grouped `(date, type_code)` sums feed it through the
//! [`TransactionSource`] trait. The opening balance for a window is
//! reconstructed from pre-aggregated sums-by-type rather than replaying
//! history, which keeps the computation proportional to the number of
//! distinct type codes instead of ledger size.

pub mod aggregator;
pub mod metrics;
pub mod opening;
pub mod source;
pub mod types;

#[cfg(test)]
mod props;

pub use aggregator::PeriodAggregator;
pub use metrics::ProfitabilityMetrics;
pub use opening::OpeningBalanceReconstructor;
pub use source::{FoldStats, GroupedSource, RowSource, TransactionSource};
pub use types::{
    AggregationOutcome, DailyBucket, GroupedDailyAmount, LedgerTransaction, LegacySplitSummary,
    PeriodSummary, TypeCodeSum,
};
