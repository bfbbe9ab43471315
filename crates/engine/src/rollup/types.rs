//! Rollup payload types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::aggregate::{DailyBucket, LegacySplitSummary, PeriodSummary, ProfitabilityMetrics};

/// Time-series payload for a single task's WIP chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WipTimeSeries {
    /// Downsampled daily buckets, chronological.
    pub daily_metrics: Vec<DailyBucket>,
    /// Window summary.
    pub summary: PeriodSummary,
    /// True when the in-window fetch hit its row cap.
    pub limit_reached: bool,
    /// Grouped rows the window aggregation consumed.
    pub transaction_count: u64,
}

/// Per-master-service-line slice of a group rollup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLineRollup {
    /// Window summary for this line.
    pub summary: PeriodSummary,
    /// Profitability metrics for this line.
    pub metrics: ProfitabilityMetrics,
    /// Legacy split-field view of the summary.
    pub legacy_split: LegacySplitSummary,
    /// Distinct tasks with transactions in the window. Counts owning
    /// entities, never transaction rows.
    pub task_count: u64,
    /// Transaction rows aggregated into this line.
    pub transaction_count: u64,
}

/// Client-group (or organization) rollup payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupRollup {
    /// Group-wide summary across every master service line.
    pub overall: PeriodSummary,
    /// Group-wide profitability metrics.
    pub overall_metrics: ProfitabilityMetrics,
    /// One rollup per canonical master service line code.
    pub by_master_service_line: BTreeMap<String, ServiceLineRollup>,
    /// Member tasks resolved for the group (capped).
    pub task_count: u64,
    /// Transaction rows aggregated (capped).
    pub transaction_count: u64,
    /// True when any fetch hit a cap; the payload is valid but partial.
    pub limit_reached: bool,
    /// True when member resolution hit the entity cap.
    pub entity_limit_reached: bool,
    /// True when the transaction fetch hit the row cap.
    pub row_limit_reached: bool,
}
