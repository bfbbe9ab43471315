//! Transaction categorization into financial buckets.
//!
//! Every ledger transaction lands in exactly one category. Unknown codes
//! degrade to `Uncategorized` rather than failing; uncategorized amounts are
//! counted so silent data loss stays observable, but they never touch the
//! five real buckets or the running balance.

pub mod rules;
pub mod types;

pub use rules::TransactionCategorizer;
pub use types::{Category, CategoryTotals};
