//! External-to-master service line mapping.
//!
//! Client-group and organization rollups group tasks by canonical "master"
//! service line. The mapping table lives in an external system, changes
//! slowly, and is bulk-loaded into a TTL snapshot here; availability beats
//! freshness, so a failed reload serves stale data instead of failing the
//! request.

pub mod error;
pub mod mapper;

pub use error::MappingError;
pub use mapper::{
    ServiceLineMapper, ServiceLineMapping, ServiceLineMappingProvider, UNKNOWN_MASTER_CODE,
};
