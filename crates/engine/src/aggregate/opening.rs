//! Opening-balance reconstruction from pre-aggregated sums.

use praxis_shared::ProvisionSign;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::TypeCodeSum;
use crate::category::{CategoryTotals, TransactionCategorizer};

/// Reconstructs the WIP balance immediately before a reporting window.
///
/// Input is `(type_code, sum(amount))` tuples already aggregated by the
/// data layer over everything dated before the window start. Folding those
/// is O(distinct type codes), where replaying rows would be O(history).
///
/// Subtype granularity does not survive pre-aggregation, so categorization
/// runs on the type code alone. This is an accepted accuracy/performance
/// trade-off: today every subtype rule refines within the same balance
/// direction, and the equivalence property test guards rule changes.
pub struct OpeningBalanceReconstructor;

impl OpeningBalanceReconstructor {
    /// Folds pre-aggregated sums into a single signed opening balance.
    ///
    /// Uses the same delta formula as the in-window aggregation, so the
    /// balance is continuous across the window boundary.
    #[must_use]
    pub fn reconstruct(type_sums: &[TypeCodeSum], provision_sign: ProvisionSign) -> Decimal {
        let mut totals = CategoryTotals::default();
        let mut uncategorized = 0u64;

        for sum in type_sums {
            let category = TransactionCategorizer::categorize(&sum.type_code, None);
            if !totals.apply(category, sum.amount) {
                uncategorized += 1;
            }
        }

        if uncategorized > 0 {
            debug!(
                count = uncategorized,
                "uncategorized type groups excluded from opening balance"
            );
        }

        totals.wip_delta(provision_sign)
    }
}
