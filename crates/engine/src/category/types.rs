//! Category partition and per-bucket totals.

use praxis_shared::ProvisionSign;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial bucket a transaction belongs to.
///
/// The partition is total: every `(type_code, subtype_code)` pair maps to
/// exactly one variant, with `Uncategorized` as the fallback for codes the
/// rule table does not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Time charged to the engagement.
    Production,
    /// Write-offs, write-ons, and other value corrections.
    Adjustment,
    /// Out-of-pocket costs recharged to the client.
    Disbursement,
    /// Fees invoiced to the client.
    Billing,
    /// Provisions held against future billing.
    Provision,
    /// Code not recognized by the rule table.
    Uncategorized,
}

impl Category {
    /// All six variants, in bucket order.
    pub const ALL: [Self; 6] = [
        Self::Production,
        Self::Adjustment,
        Self::Disbursement,
        Self::Billing,
        Self::Provision,
        Self::Uncategorized,
    ];

    /// Stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Adjustment => "adjustment",
            Self::Disbursement => "disbursement",
            Self::Billing => "billing",
            Self::Provision => "provision",
            Self::Uncategorized => "uncategorized",
        }
    }
}

/// Sign-normalized totals for the five real buckets.
///
/// Production, adjustments, and disbursements accumulate raw signed amounts.
/// Billing and provisions are written to the ledger as negative amounts and
/// accumulate negated, so all five fields read as positive magnitudes in the
/// common case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotals {
    /// Total production value.
    pub production: Decimal,
    /// Total adjustments.
    pub adjustments: Decimal,
    /// Total disbursements.
    pub disbursements: Decimal,
    /// Total billing (negated from ledger sign).
    pub billing: Decimal,
    /// Total provisions (negated from ledger sign).
    pub provisions: Decimal,
}

impl CategoryTotals {
    /// Applies a categorized amount.
    ///
    /// Returns `false` for `Uncategorized` amounts, which are excluded from
    /// every bucket; the caller counts them instead.
    pub fn apply(&mut self, category: Category, amount: Decimal) -> bool {
        match category {
            Category::Production => self.production += amount,
            Category::Adjustment => self.adjustments += amount,
            Category::Disbursement => self.disbursements += amount,
            Category::Billing => self.billing += -amount,
            Category::Provision => self.provisions += -amount,
            Category::Uncategorized => return false,
        }
        true
    }

    /// Merges another set of totals into this one.
    pub fn merge(&mut self, other: &Self) {
        self.production += other.production;
        self.adjustments += other.adjustments;
        self.disbursements += other.disbursements;
        self.billing += other.billing;
        self.provisions += other.provisions;
    }

    /// Net change this set of totals applies to the running WIP balance.
    ///
    /// `production + adjustments + disbursements - billing` with the
    /// provision term governed by the configured sign convention.
    #[must_use]
    pub fn wip_delta(&self, provision_sign: ProvisionSign) -> Decimal {
        let base = self.production + self.adjustments + self.disbursements - self.billing;
        match provision_sign {
            ProvisionSign::Subtract => base - self.provisions,
            ProvisionSign::Add => base + self.provisions,
        }
    }

    /// Returns true if every bucket is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.production.is_zero()
            && self.adjustments.is_zero()
            && self.disbursements.is_zero()
            && self.billing.is_zero()
            && self.provisions.is_zero()
    }
}
