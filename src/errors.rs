//! Configuration Drift Core Error Hierarchy
//!
//! Defines error types for the drift tracking core, categorized by
//! the failing collaborator and operational concerns.

use std::time::Duration;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Drift cache and group identity failures
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Config Lookup collaborator call failures (transport level)
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Settings loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The authoritative configuration does not exist or is incomplete.
    /// Carries the decomposed identifiers for diagnostics.
    #[error("config is null. pool_id :: {pool_id}, item_id :: {item_id}, tenant_id :: {tenant_id}")]
    NotFound {
        pool_id: String,
        item_id: String,
        tenant_id: String,
    },

    /// Config Lookup resolved to nothing usable while a mutation was in
    /// flight. The cache entry is left unchanged.
    #[error("authoritative config unresolvable for group {group_key}")]
    LookupFailure { group_key: String },

    /// The composite key does not decompose into exactly three components.
    /// Rejected before any cache or lookup access.
    #[error("malformed group identity: {0}")]
    MalformedIdentity(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// Config Lookup did not answer within the configured bound
    #[error("config lookup timed out after {0:?}")]
    Timeout(Duration),

    /// Config Lookup backend unreachable or failing
    #[error("config lookup unavailable: {0}")]
    Unavailable(String),
}
