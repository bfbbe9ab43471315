//! Profitability metrics derived from a period summary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::PeriodSummary;

/// Profitability metrics for a summary plus cost/hours aggregates.
///
/// All ratios and rates are zero when their denominator is zero; the engine
/// never emits NaN or infinity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitabilityMetrics {
    /// `production + disbursements`.
    pub gross_production: Decimal,
    /// `gross_production + adjustments`.
    pub net_revenue: Decimal,
    /// `net_revenue - cost`.
    pub gross_profit: Decimal,
    /// `gross_profit / net_revenue`, as a percentage.
    pub gross_profit_percent: Decimal,
    /// `net_revenue / gross_production`, as a percentage.
    pub recovery_percent: Decimal,
    /// `gross_production / hours`.
    pub average_chargeout_rate: Decimal,
    /// `net_revenue / hours`.
    pub average_recovery_rate: Decimal,
    /// Total cost over the window, after any cost overrides.
    pub total_cost: Decimal,
    /// Total hours over the window.
    pub total_hours: Decimal,
}

impl ProfitabilityMetrics {
    /// Derives metrics from a summary and cost/hours aggregates.
    #[must_use]
    pub fn from_summary(summary: &PeriodSummary, cost: Decimal, hours: Decimal) -> Self {
        let gross_production = summary.total_production + summary.total_disbursements;
        let net_revenue = gross_production + summary.total_adjustments;
        let gross_profit = net_revenue - cost;

        Self {
            gross_production,
            net_revenue,
            gross_profit,
            gross_profit_percent: percent(gross_profit, net_revenue),
            recovery_percent: percent(net_revenue, gross_production),
            average_chargeout_rate: safe_div(gross_production, hours),
            average_recovery_rate: safe_div(net_revenue, hours),
            total_cost: cost,
            total_hours: hours,
        }
    }
}

/// `numerator / denominator`, or zero when the denominator is zero.
fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

/// `numerator / denominator * 100`, or zero when the denominator is zero.
fn percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    safe_div(numerator, denominator) * Decimal::ONE_HUNDRED
}
