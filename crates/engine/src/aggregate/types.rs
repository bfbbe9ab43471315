//! Input and output types for period aggregation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::category::CategoryTotals;

/// A dated ledger transaction, immutable once written upstream.
///
/// The engine reads these, it never mutates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTransaction {
    /// Opaque key of the owning task.
    pub owner_key: String,
    /// Transaction date; time-of-day carries no meaning for bucketing.
    pub date: NaiveDate,
    /// Primary category code.
    pub type_code: String,
    /// Secondary disambiguator, when the upstream system recorded one.
    pub subtype_code: Option<String>,
    /// Signed currency amount.
    pub amount: Decimal,
    /// Signed cost amount, when known.
    pub cost: Option<Decimal>,
    /// Hours charged, when known.
    pub hours: Option<Decimal>,
    /// Employee who owns the transaction, when known.
    pub employee_code: Option<String>,
}

/// A `(date, type_code)` sum pre-grouped by the data layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedDailyAmount {
    /// Transaction date of the group.
    pub date: NaiveDate,
    /// Primary category code of the group.
    pub type_code: String,
    /// Sum of signed amounts in the group.
    pub amount: Decimal,
}

/// A `(type_code, sum)` tuple aggregated over all history before a window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCodeSum {
    /// Primary category code of the group.
    pub type_code: String,
    /// Sum of signed amounts in the group.
    pub amount: Decimal,
}

/// Category totals and running WIP balance for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBucket {
    /// Calendar day.
    pub date: NaiveDate,
    /// Production for the day.
    pub production: Decimal,
    /// Adjustments for the day.
    pub adjustments: Decimal,
    /// Disbursements for the day.
    pub disbursements: Decimal,
    /// Billing for the day (positive magnitude).
    pub billing: Decimal,
    /// Provisions for the day (positive magnitude).
    pub provisions: Decimal,
    /// Cumulative WIP balance as of end of this day.
    pub wip_balance: Decimal,
}

impl DailyBucket {
    /// Builds a bucket from a day's totals and the balance after that day.
    #[must_use]
    pub fn from_totals(date: NaiveDate, totals: &CategoryTotals, wip_balance: Decimal) -> Self {
        Self {
            date,
            production: totals.production,
            adjustments: totals.adjustments,
            disbursements: totals.disbursements,
            billing: totals.billing,
            provisions: totals.provisions,
            wip_balance,
        }
    }

    /// Returns true if any of the five category fields is non-zero.
    ///
    /// The running balance is deliberately ignored: a flat balance day with
    /// no movement carries no chart signal.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        !(self.production.is_zero()
            && self.adjustments.is_zero()
            && self.disbursements.is_zero()
            && self.billing.is_zero()
            && self.provisions.is_zero())
    }
}

/// Category totals summed across a window, plus the closing balance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    /// Total production across the window.
    pub total_production: Decimal,
    /// Total adjustments across the window.
    pub total_adjustments: Decimal,
    /// Total disbursements across the window.
    pub total_disbursements: Decimal,
    /// Total billing across the window.
    pub total_billing: Decimal,
    /// Total provisions across the window.
    pub total_provisions: Decimal,
    /// Last bucket's running balance, or the opening balance when the
    /// window has no buckets.
    pub current_wip_balance: Decimal,
}

/// Everything one aggregation run produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationOutcome {
    /// Per-day buckets, chronological.
    pub daily_buckets: Vec<DailyBucket>,
    /// Window summary.
    pub summary: PeriodSummary,
    /// Transactions excluded from every bucket by the categorizer.
    pub uncategorized_count: u64,
}

/// Legacy split-field view of a summary.
///
/// Older rollup consumers split adjustments and fees into time and
/// disbursement components. Internally there is one merged model; this view
/// is derived by putting the merged totals on the time side and zeroing the
/// disbursement side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySplitSummary {
    /// Life-to-date adjustments against time.
    pub ltd_adj_time: Decimal,
    /// Life-to-date adjustments against disbursements (always zero).
    pub ltd_adj_disb: Decimal,
    /// Life-to-date fees against time.
    pub ltd_fee_time: Decimal,
    /// Life-to-date fees against disbursements (always zero).
    pub ltd_fee_disb: Decimal,
}

impl LegacySplitSummary {
    /// Derives the split view from a merged summary.
    #[must_use]
    pub fn from_summary(summary: &PeriodSummary) -> Self {
        Self {
            ltd_adj_time: summary.total_adjustments,
            ltd_adj_disb: Decimal::ZERO,
            ltd_fee_time: summary.total_billing,
            ltd_fee_disb: Decimal::ZERO,
        }
    }
}
