//! WIP and profitability aggregation engine for Praxis.
//!
//! This crate turns a stream of dated ledger transactions into time-bucketed
//! financial metrics (production, adjustments, disbursements, billing,
//! provisions, running WIP balance) at task, client-group, and organization
//! level. It contains pure business logic with ZERO web or database
//! dependencies; the data layer is injected through async provider traits.
//!
//! # Modules
//!
//! - `category` - Transaction categorization into financial buckets
//! - `serviceline` - External-to-master service line mapping
//! - `aggregate` - Period aggregation, opening-balance reconstruction, metrics
//! - `downsample` - Chart series reduction
//! - `rollup` - Task/group/organization rollup composition
//! - `cache` - TTL-keyed result caching

pub mod aggregate;
pub mod cache;
pub mod category;
pub mod downsample;
pub mod rollup;
pub mod serviceline;
