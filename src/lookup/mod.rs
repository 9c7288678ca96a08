//! Boundary to the persistent configuration store.
//!
//! The drift core never reads storage itself; it calls the [`ConfigLookup`]
//! collaborator, which may block, fail or time out. Every call through this
//! module is bounded by the configured lookup timeout so a stuck backend
//! never wedges a request handler.

use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::GroupKey;
use crate::LookupError;
use crate::Result;
use crate::LOOKUP_FAILURES_METRIC;

/// One authoritative configuration as resolved by the store.
///
/// Usable only when `pool_id` is non-empty; an incomplete row is treated the
/// same as an absent one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    pub pool_id: String,
    pub item_id: String,
    pub tenant_id: String,

    /// Baseline number of workers kept alive in the target pool
    #[serde(default)]
    pub core_size: u32,
    /// Upper bound of workers the target pool may grow to
    #[serde(default)]
    pub max_size: u32,
    #[serde(default)]
    pub queue_capacity: u32,
    /// Idle worker keep-alive, in seconds
    #[serde(default)]
    pub keep_alive_secs: u64,
    /// Policy applied when the pool and its queue are saturated
    #[serde(default)]
    pub rejected_policy: String,
}

impl ConfigSnapshot {
    pub fn is_usable(&self) -> bool {
        !self.pool_id.is_empty()
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConfigLookup: Send + Sync + 'static {
    /// Resolve the authoritative configuration for one target.
    ///
    /// `Ok(None)` means the target does not exist; transport-level trouble
    /// is a [`LookupError`], never silently mapped to absence.
    async fn find(
        &self,
        pool_id: &str,
        item_id: &str,
        tenant_id: &str,
    ) -> std::result::Result<Option<ConfigSnapshot>, LookupError>;
}

/// Run one lookup with the configured time bound.
pub(crate) async fn find_bounded(
    lookup: &dyn ConfigLookup,
    group: &GroupKey,
    limit: Duration,
) -> Result<Option<ConfigSnapshot>> {
    match tokio::time::timeout(limit, lookup.find(&group.pool_id, &group.item_id, &group.tenant_id)).await {
        Ok(Ok(found)) => Ok(found),
        Ok(Err(err)) => {
            LOOKUP_FAILURES_METRIC.with_label_values(&["unavailable"]).inc();
            Err(err.into())
        }
        Err(_) => {
            LOOKUP_FAILURES_METRIC.with_label_values(&["timeout"]).inc();
            Err(LookupError::Timeout(limit).into())
        }
    }
}
