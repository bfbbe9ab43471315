//! Engine configuration management.
//!
//! Every fetch the engine issues is bounded by these ceilings; memory and
//! latency stay proportional to configuration, not to ledger size.

use serde::Deserialize;

use crate::types::ProvisionSign;

/// Engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Maximum member tasks resolved for a client-group rollup.
    #[serde(default = "default_entity_cap")]
    pub entity_cap: u64,
    /// Maximum ledger rows fetched for a single rollup.
    #[serde(default = "default_row_cap")]
    pub row_cap: u64,
    /// TTL for the service-line mapping snapshot, in seconds.
    #[serde(default = "default_mapping_ttl")]
    pub mapping_ttl_secs: u64,
    /// TTL for cached group/organization rollup payloads, in seconds.
    #[serde(default = "default_rollup_cache_ttl")]
    pub rollup_cache_ttl_secs: u64,
    /// TTL for cached single-task time-series payloads, in seconds.
    #[serde(default = "default_chart_cache_ttl")]
    pub chart_cache_ttl_secs: u64,
    /// Trailing window length for single-task charts, in months.
    #[serde(default = "default_chart_window_months")]
    pub chart_window_months: u32,
    /// Trailing window length for group rollups, in months.
    #[serde(default = "default_rollup_window_months")]
    pub rollup_window_months: u32,
    /// Employee codes whose cost is zeroed before profitability metrics
    /// (internal partners whose time must not inflate cost).
    #[serde(default)]
    pub internal_partner_codes: Vec<String>,
    /// Sign convention applied to provisions in the running balance.
    #[serde(default)]
    pub provision_sign: ProvisionSign,
}

fn default_entity_cap() -> u64 {
    1_000
}

fn default_row_cap() -> u64 {
    100_000
}

fn default_mapping_ttl() -> u64 {
    600 // 10 minutes
}

fn default_rollup_cache_ttl() -> u64 {
    600 // 10 minutes
}

fn default_chart_cache_ttl() -> u64 {
    1_800 // 30 minutes
}

fn default_chart_window_months() -> u32 {
    12
}

fn default_rollup_window_months() -> u32 {
    24
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            entity_cap: default_entity_cap(),
            row_cap: default_row_cap(),
            mapping_ttl_secs: default_mapping_ttl(),
            rollup_cache_ttl_secs: default_rollup_cache_ttl(),
            chart_cache_ttl_secs: default_chart_cache_ttl(),
            chart_window_months: default_chart_window_months(),
            rollup_window_months: default_rollup_window_months(),
            internal_partner_codes: Vec::new(),
            provision_sign: ProvisionSign::default(),
        }
    }
}

impl EngineConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PRAXIS").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
