//! Rollup composition over the injected store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use praxis_shared::{EngineConfig, EngineError, EngineResult, ReportingWindow, Resolution};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::store::{LedgerStore, StoreError, TaskRef};
use super::types::{GroupRollup, ServiceLineRollup, WipTimeSeries};
use crate::aggregate::{
    GroupedSource, LedgerTransaction, LegacySplitSummary, OpeningBalanceReconstructor,
    PeriodAggregator, PeriodSummary, ProfitabilityMetrics, RowSource,
};
use crate::cache::{CacheKey, ResultCache};
use crate::downsample::Downsampler;
use crate::serviceline::{ServiceLineMapper, UNKNOWN_MASTER_CODE};

impl From<StoreError> for EngineError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Composes task, client-group, and organization rollups.
///
/// Collaborators are injected so tests substitute in-memory fakes; the
/// composer itself holds no mutable state beyond its caches.
pub struct RollupComposer {
    store: Arc<dyn LedgerStore>,
    mapper: Arc<ServiceLineMapper>,
    config: EngineConfig,
    chart_cache: ResultCache<WipTimeSeries>,
    rollup_cache: ResultCache<GroupRollup>,
}

impl RollupComposer {
    /// Creates a composer with caches sized from configuration.
    #[must_use]
    pub fn new(
        store: Arc<dyn LedgerStore>,
        mapper: Arc<ServiceLineMapper>,
        config: EngineConfig,
    ) -> Self {
        let chart_cache = ResultCache::new(config.chart_cache_ttl_secs);
        let rollup_cache = ResultCache::new(config.rollup_cache_ttl_secs);
        Self {
            store,
            mapper,
            config,
            chart_cache,
            rollup_cache,
        }
    }

    /// Builds the WIP time series for a single task over the configured
    /// trailing chart window ending at `as_of`.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` when the window underflows the calendar;
    /// otherwise as [`Self::task_time_series`].
    pub async fn task_time_series_trailing(
        &self,
        task_key: &str,
        as_of: NaiveDate,
        resolution: Resolution,
    ) -> EngineResult<WipTimeSeries> {
        let window = ReportingWindow::trailing_months(as_of, self.config.chart_window_months)?;
        self.task_time_series(task_key, window, resolution).await
    }

    /// Builds the rollup for a client group over the configured trailing
    /// rollup window ending at `as_of`.
    ///
    /// # Errors
    ///
    /// `EngineError::Validation` when the window underflows the calendar;
    /// otherwise as [`Self::group_rollup`].
    pub async fn group_rollup_trailing(
        &self,
        group_key: &str,
        as_of: NaiveDate,
    ) -> EngineResult<GroupRollup> {
        let window = ReportingWindow::trailing_months(as_of, self.config.rollup_window_months)?;
        self.group_rollup(group_key, window).await
    }

    /// Builds the WIP time series for a single task.
    ///
    /// The pre-window sums and the in-window grouped rows are independent
    /// fetches, issued concurrently and joined before aggregation. Grouped
    /// input is used throughout: the chart needs no subtype detail, so the
    /// data layer does the heavy lifting.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` when the task does not exist;
    /// `EngineError::Internal` when the store fails.
    pub async fn task_time_series(
        &self,
        task_key: &str,
        window: ReportingWindow,
        resolution: Resolution,
    ) -> EngineResult<WipTimeSeries> {
        self.store
            .find_task(task_key)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("task {task_key}")))?;

        let cache_key = CacheKey::scope("task", task_key)
            .window(window)
            .resolution(resolution)
            .provision_sign(self.config.provision_sign)
            .build();
        if let Some(hit) = self.chart_cache.get(&cache_key) {
            debug!(key = %cache_key, "chart cache hit");
            return Ok((*hit).clone());
        }

        let task_keys = vec![task_key.to_string()];
        let (type_sums, grouped) = tokio::try_join!(
            self.store.sums_by_type_before(&task_keys, window.start),
            self.store
                .grouped_daily_amounts(&task_keys, window, self.config.row_cap),
        )?;

        if grouped.limit_reached {
            warn!(
                task = task_key,
                cap = self.config.row_cap,
                "grouped row cap reached, chart reflects a partial window"
            );
        }

        let opening =
            OpeningBalanceReconstructor::reconstruct(&type_sums, self.config.provision_sign);
        let transaction_count = grouped.rows.len() as u64;
        let outcome = PeriodAggregator::aggregate(
            &GroupedSource(&grouped.rows),
            opening,
            self.config.provision_sign,
        );

        let payload = WipTimeSeries {
            daily_metrics: Downsampler::downsample(
                outcome.daily_buckets,
                resolution.target_points(),
            ),
            summary: outcome.summary,
            limit_reached: grouped.limit_reached,
            transaction_count,
        };

        self.chart_cache.insert(cache_key, payload.clone());
        Ok(payload)
    }

    /// Builds the rollup for a client group: one summary per master service
    /// line plus the group-wide `overall`.
    ///
    /// Member resolution and the row fetch are capped; hitting a cap flags
    /// the payload as partial instead of failing. The in-window transaction
    /// fetch and the per-line opening-balance fetches are issued
    /// concurrently and joined before aggregation.
    ///
    /// # Errors
    ///
    /// `EngineError::NotFound` when the group does not exist;
    /// `EngineError::Internal` when the store fails.
    pub async fn group_rollup(
        &self,
        group_key: &str,
        window: ReportingWindow,
    ) -> EngineResult<GroupRollup> {
        self.store
            .find_client_group(group_key)
            .await?
            .ok_or_else(|| EngineError::NotFound(format!("client group {group_key}")))?;

        let cache_key = CacheKey::scope("client-group", group_key)
            .window(window)
            .provision_sign(self.config.provision_sign)
            .build();
        if let Some(hit) = self.rollup_cache.get(&cache_key) {
            debug!(key = %cache_key, "rollup cache hit");
            return Ok((*hit).clone());
        }

        let members = self
            .store
            .member_tasks(group_key, self.config.entity_cap)
            .await?;
        if members.limit_reached {
            warn!(
                group = group_key,
                cap = self.config.entity_cap,
                "entity cap reached, rollup reflects a member prefix"
            );
        }

        let master_by_task = self.resolve_master_lines(&members.rows).await;
        let mut line_members: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for task in &members.rows {
            line_members
                .entry(master_by_task[&task.key].clone())
                .or_default()
                .push(task.key.clone());
        }

        let task_keys: Vec<String> = members.rows.iter().map(|t| t.key.clone()).collect();
        let sign = self.config.provision_sign;

        let openings_fut = async {
            let mut openings: BTreeMap<String, Decimal> = BTreeMap::new();
            for (line, keys) in &line_members {
                let sums = self.store.sums_by_type_before(keys, window.start).await?;
                openings.insert(
                    line.clone(),
                    OpeningBalanceReconstructor::reconstruct(&sums, sign),
                );
            }
            Ok::<_, StoreError>(openings)
        };
        let (transactions, line_openings) = tokio::try_join!(
            self.store
                .transactions_in_window(&task_keys, window, self.config.row_cap),
            openings_fut,
        )?;

        if transactions.limit_reached {
            warn!(
                group = group_key,
                cap = self.config.row_cap,
                "row cap reached, rollup reflects a transaction prefix"
            );
        }

        let mut line_rows: BTreeMap<String, Vec<LedgerTransaction>> = BTreeMap::new();
        for line in line_members.keys() {
            line_rows.insert(line.clone(), Vec::new());
        }
        for tx in transactions.rows {
            let line = master_by_task
                .get(&tx.owner_key)
                .cloned()
                .unwrap_or_else(|| UNKNOWN_MASTER_CODE.to_string());
            line_rows.entry(line).or_default().push(tx);
        }

        let mut by_master_service_line = BTreeMap::new();
        let mut overall = PeriodSummary::default();
        let mut overall_cost = Decimal::ZERO;
        let mut overall_hours = Decimal::ZERO;
        let mut transaction_count = 0u64;
        let mut uncategorized_total = 0u64;

        for (line, rows) in &line_rows {
            let opening = line_openings.get(line).copied().unwrap_or_default();
            let outcome = PeriodAggregator::aggregate(&RowSource(rows), opening, sign);
            uncategorized_total += outcome.uncategorized_count;
            transaction_count += rows.len() as u64;

            let (cost, hours) = self.cost_and_hours(rows);
            let owners: BTreeSet<&str> = rows.iter().map(|tx| tx.owner_key.as_str()).collect();

            overall.total_production += outcome.summary.total_production;
            overall.total_adjustments += outcome.summary.total_adjustments;
            overall.total_disbursements += outcome.summary.total_disbursements;
            overall.total_billing += outcome.summary.total_billing;
            overall.total_provisions += outcome.summary.total_provisions;
            overall.current_wip_balance += outcome.summary.current_wip_balance;
            overall_cost += cost;
            overall_hours += hours;

            by_master_service_line.insert(
                line.clone(),
                ServiceLineRollup {
                    metrics: ProfitabilityMetrics::from_summary(&outcome.summary, cost, hours),
                    legacy_split: LegacySplitSummary::from_summary(&outcome.summary),
                    summary: outcome.summary,
                    task_count: owners.len() as u64,
                    transaction_count: rows.len() as u64,
                },
            );
        }

        if uncategorized_total > 0 {
            warn!(
                group = group_key,
                count = uncategorized_total,
                "uncategorized transactions excluded from group rollup"
            );
        }

        let payload = GroupRollup {
            overall_metrics: ProfitabilityMetrics::from_summary(
                &overall,
                overall_cost,
                overall_hours,
            ),
            overall,
            by_master_service_line,
            task_count: members.rows.len() as u64,
            transaction_count,
            limit_reached: members.limit_reached || transactions.limit_reached,
            entity_limit_reached: members.limit_reached,
            row_limit_reached: transactions.limit_reached,
        };

        self.rollup_cache.insert(cache_key, payload.clone());
        Ok(payload)
    }

    /// Maps each member task to its master service line, deduplicating
    /// mapper lookups per external code.
    async fn resolve_master_lines(&self, tasks: &[TaskRef]) -> HashMap<String, String> {
        let mut master_by_code: HashMap<String, String> = HashMap::new();
        let mut master_by_task = HashMap::with_capacity(tasks.len());

        for task in tasks {
            let master = match &task.service_line_code {
                Some(code) => {
                    if let Some(known) = master_by_code.get(code) {
                        known.clone()
                    } else {
                        let master = self.mapper.map_to_master(code).await;
                        master_by_code.insert(code.clone(), master.clone());
                        master
                    }
                }
                None => UNKNOWN_MASTER_CODE.to_string(),
            };
            master_by_task.insert(task.key.clone(), master);
        }
        master_by_task
    }

    /// Sums cost and hours over rows, zeroing cost for configured
    /// internal-partner employees so internal time does not inflate cost.
    fn cost_and_hours(&self, rows: &[LedgerTransaction]) -> (Decimal, Decimal) {
        let mut cost = Decimal::ZERO;
        let mut hours = Decimal::ZERO;
        for tx in rows {
            let internal = tx
                .employee_code
                .as_deref()
                .is_some_and(|code| self.config.internal_partner_codes.iter().any(|p| p == code));
            if !internal {
                cost += tx.cost.unwrap_or_default();
            }
            hours += tx.hours.unwrap_or_default();
        }
        (cost, hours)
    }

    /// Invalidates every cached payload, e.g. after a ledger backfill.
    pub fn invalidate_caches(&self) {
        self.chart_cache.invalidate_all();
        self.rollup_cache.invalidate_all();
    }
}
