//! Task, client-group, and organization rollups.
//!
//! The composer fans out capped data fetches through the injected
//! [`LedgerStore`], reconstructs opening balances, runs the period
//! aggregation per scope, groups by master service line, and caches the
//! finished payloads. Hitting a cap degrades to a labeled partial result;
//! it never fails the request.

pub mod composer;
pub mod store;
pub mod types;


pub use composer::RollupComposer;
pub use store::{CappedRows, ClientGroupRef, LedgerStore, StoreError, TaskRef};
pub use types::{GroupRollup, ServiceLineRollup, WipTimeSeries};
