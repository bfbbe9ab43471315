//! Precedence-ordered categorization rules.
//!
//! The most specific `(type, subtype)` rule wins, then the type-only rule,
//! then `Uncategorized`. Matching is case-insensitive because the upstream
//! practice-management system is inconsistent about casing.

use super::types::Category;

/// Exact `(type_code, subtype_code)` rules, checked first.
const SUBTYPE_RULES: &[(&str, &str, Category)] = &[
    // Written-off time and disbursements are value corrections, not
    // production or cost.
    ("TIME", "WOFF", Category::Adjustment),
    ("TIME", "WON", Category::Adjustment),
    ("DISB", "WOFF", Category::Adjustment),
    // Credit notes reverse fees but remain billing movements.
    ("FEE", "CRN", Category::Billing),
];

/// Type-only fallback rules.
const TYPE_RULES: &[(&str, Category)] = &[
    ("TIME", Category::Production),
    ("DISB", Category::Disbursement),
    ("EXP", Category::Disbursement),
    ("FEE", Category::Billing),
    ("INV", Category::Billing),
    ("ADJ", Category::Adjustment),
    ("WIPADJ", Category::Adjustment),
    ("PROV", Category::Provision),
];

/// Pure categorization of transaction type/subtype codes.
pub struct TransactionCategorizer;

impl TransactionCategorizer {
    /// Maps a `(type_code, subtype_code)` pair to exactly one category.
    ///
    /// Total and side-effect-free: unknown codes never error, they degrade
    /// to [`Category::Uncategorized`].
    #[must_use]
    pub fn categorize(type_code: &str, subtype_code: Option<&str>) -> Category {
        let type_code = type_code.trim().to_ascii_uppercase();

        if let Some(subtype) = subtype_code {
            let subtype = subtype.trim().to_ascii_uppercase();
            for (t, s, category) in SUBTYPE_RULES {
                if *t == type_code && *s == subtype {
                    return *category;
                }
            }
        }

        for (t, category) in TYPE_RULES {
            if *t == type_code {
                return *category;
            }
        }

        Category::Uncategorized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("TIME", None, Category::Production)]
    #[case("DISB", None, Category::Disbursement)]
    #[case("EXP", None, Category::Disbursement)]
    #[case("FEE", None, Category::Billing)]
    #[case("INV", None, Category::Billing)]
    #[case("ADJ", None, Category::Adjustment)]
    #[case("WIPADJ", None, Category::Adjustment)]
    #[case("PROV", None, Category::Provision)]
    fn test_type_only_rules(
        #[case] type_code: &str,
        #[case] subtype: Option<&str>,
        #[case] expected: Category,
    ) {
        assert_eq!(TransactionCategorizer::categorize(type_code, subtype), expected);
    }

    #[rstest]
    #[case("TIME", "WOFF", Category::Adjustment)]
    #[case("TIME", "WON", Category::Adjustment)]
    #[case("DISB", "WOFF", Category::Adjustment)]
    #[case("FEE", "CRN", Category::Billing)]
    fn test_subtype_rules_take_precedence(
        #[case] type_code: &str,
        #[case] subtype: &str,
        #[case] expected: Category,
    ) {
        assert_eq!(
            TransactionCategorizer::categorize(type_code, Some(subtype)),
            expected
        );
    }

    #[test]
    fn test_unknown_subtype_falls_back_to_type_rule() {
        assert_eq!(
            TransactionCategorizer::categorize("TIME", Some("OVERTIME")),
            Category::Production
        );
    }

    #[test]
    fn test_unknown_type_degrades_to_uncategorized() {
        assert_eq!(
            TransactionCategorizer::categorize("MYSTERY", None),
            Category::Uncategorized
        );
        assert_eq!(
            TransactionCategorizer::categorize("", None),
            Category::Uncategorized
        );
        assert_eq!(
            TransactionCategorizer::categorize("MYSTERY", Some("WOFF")),
            Category::Uncategorized
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(
            TransactionCategorizer::categorize("time", None),
            Category::Production
        );
        assert_eq!(
            TransactionCategorizer::categorize(" Fee ", Some("crn")),
            Category::Billing
        );
    }
}
