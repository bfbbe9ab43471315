//! Service line mapping error types.

use thiserror::Error;

/// Errors raised by a mapping provider.
///
/// Never fatal to a request: the mapper serves stale data or the UNKNOWN
/// sentinel instead of propagating these to the caller.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Bulk load from the mapping source failed.
    #[error("Mapping load failed: {0}")]
    LoadFailed(String),
}
