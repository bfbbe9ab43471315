//! The injected data-layer seam.

use async_trait::async_trait;
use chrono::NaiveDate;
use praxis_shared::ReportingWindow;
use thiserror::Error;

use crate::aggregate::{GroupedDailyAmount, LedgerTransaction, TypeCodeSum};

/// Errors a ledger store implementation can raise.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing data store failed.
    #[error("Data store error: {0}")]
    Backend(String),
}

/// A task known to the practice-management system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRef {
    /// Opaque task key, unique across the organization.
    pub key: String,
    /// External service line code, when assigned.
    pub service_line_code: Option<String>,
}

/// A client group known to the practice-management system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientGroupRef {
    /// Opaque group key.
    pub key: String,
    /// Display name.
    pub name: String,
}

/// Rows returned from a capped fetch.
///
/// `limit_reached` means the fetch stopped at its cap and the rows are a
/// deterministic prefix of the full result, not the full result.
#[derive(Debug, Clone)]
pub struct CappedRows<T> {
    /// The fetched rows.
    pub rows: Vec<T>,
    /// True when the cap cut the fetch short.
    pub limit_reached: bool,
}

impl<T> CappedRows<T> {
    /// Wraps rows known to be complete.
    #[must_use]
    pub fn complete(rows: Vec<T>) -> Self {
        Self {
            rows,
            limit_reached: false,
        }
    }
}

/// Read-only access to the ledger and entity catalog.
///
/// Every row-returning method is explicitly bounded: it takes a cap or a
/// window, so the engine's memory stays proportional to configuration
/// rather than ledger size. Implementations must return `member_tasks`
/// rows in a stable order (sorted by task key) so cap truncation is
/// deterministic.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Looks up a task by key.
    async fn find_task(&self, task_key: &str) -> Result<Option<TaskRef>, StoreError>;

    /// Looks up a client group by key.
    async fn find_client_group(
        &self,
        group_key: &str,
    ) -> Result<Option<ClientGroupRef>, StoreError>;

    /// Resolves member tasks of a client group, up to `cap`.
    async fn member_tasks(
        &self,
        group_key: &str,
        cap: u64,
    ) -> Result<CappedRows<TaskRef>, StoreError>;

    /// Fetches transactions for the given tasks within the window, up to
    /// `cap` rows.
    async fn transactions_in_window(
        &self,
        task_keys: &[String],
        window: ReportingWindow,
        cap: u64,
    ) -> Result<CappedRows<LedgerTransaction>, StoreError>;

    /// Sums amounts by type code over everything dated before `before`,
    /// for the given tasks. Pre-aggregated by the data layer; the result
    /// size is bounded by the number of distinct type codes.
    async fn sums_by_type_before(
        &self,
        task_keys: &[String],
        before: NaiveDate,
    ) -> Result<Vec<TypeCodeSum>, StoreError>;

    /// Sums amounts by `(date, type_code)` within the window for the given
    /// tasks, up to `cap` grouped rows.
    async fn grouped_daily_amounts(
        &self,
        task_keys: &[String],
        window: ReportingWindow,
        cap: u64,
    ) -> Result<CappedRows<GroupedDailyAmount>, StoreError>;
}
