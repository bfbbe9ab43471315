//! TTL-cached service line mapper.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::error::MappingError;

/// Sentinel master code for external codes with no mapping.
///
/// Unmapped tasks are bucketed here rather than dropped.
pub const UNKNOWN_MASTER_CODE: &str = "UNKNOWN";

/// One row of the external-to-master mapping table (many-to-one).
#[derive(Debug, Clone)]
pub struct ServiceLineMapping {
    /// Code as recorded by the upstream system.
    pub external_code: String,
    /// Canonical master service line code.
    pub master_code: String,
}

/// Bulk loader for the mapping table.
#[async_trait]
pub trait ServiceLineMappingProvider: Send + Sync {
    /// Loads the full mapping table.
    async fn load_mappings(&self) -> Result<Vec<ServiceLineMapping>, MappingError>;
}

struct Snapshot {
    table: HashMap<String, String>,
    loaded_at: Instant,
}

/// Maps external service line codes to master codes through a TTL snapshot.
///
/// On expiry the table is reloaded synchronously; on reload failure the
/// stale snapshot keeps serving (a slowly-changing table is better stale
/// than absent). With no snapshot at all, every code maps to
/// [`UNKNOWN_MASTER_CODE`].
pub struct ServiceLineMapper {
    provider: Arc<dyn ServiceLineMappingProvider>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl ServiceLineMapper {
    /// Creates a mapper with the given provider and snapshot TTL.
    pub fn new(provider: Arc<dyn ServiceLineMappingProvider>, ttl_secs: u64) -> Self {
        Self {
            provider,
            ttl: Duration::from_secs(ttl_secs),
            snapshot: RwLock::new(None),
        }
    }

    /// Maps an external code to its master code, or the UNKNOWN sentinel.
    pub async fn map_to_master(&self, external_code: &str) -> String {
        self.ensure_fresh().await;

        let guard = self.snapshot.read().unwrap_or_else(std::sync::PoisonError::into_inner);
        guard
            .as_ref()
            .and_then(|s| s.table.get(external_code.trim()))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_MASTER_CODE.to_string())
    }

    /// Reloads the snapshot if it is missing or past its TTL.
    ///
    /// The lock is never held across the provider call; two concurrent
    /// reloads race harmlessly and the last writer wins.
    async fn ensure_fresh(&self) {
        let fresh = {
            let guard = self
                .snapshot
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            guard
                .as_ref()
                .is_some_and(|s| s.loaded_at.elapsed() < self.ttl)
        };
        if fresh {
            return;
        }

        match self.provider.load_mappings().await {
            Ok(rows) => {
                let table: HashMap<String, String> = rows
                    .into_iter()
                    .map(|m| (m.external_code.trim().to_string(), m.master_code))
                    .collect();
                debug!(entries = table.len(), "service line mapping snapshot reloaded");
                let mut guard = self
                    .snapshot
                    .write()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                *guard = Some(Snapshot {
                    table,
                    loaded_at: Instant::now(),
                });
            }
            Err(err) => {
                let has_stale = self
                    .snapshot
                    .read()
                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                    .is_some();
                if has_stale {
                    warn!(error = %err, "mapping reload failed, serving stale snapshot");
                } else {
                    warn!(error = %err, "mapping load failed with no snapshot, codes map to UNKNOWN");
                }
            }
        }
    }
}
