use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::find_bounded;
use crate::CacheError;
use crate::CacheItem;
use crate::ChangeNotifier;
use crate::ConfigLookup;
use crate::ConfigSnapshot;
use crate::DriftCache;
use crate::EventBus;
use crate::Fingerprint;
use crate::GroupKey;
use crate::Result;
use crate::Settings;

/// Tracks, per subscribing client, the configuration fingerprint that
/// client last applied, and raises a change notification when it diverges
/// from the authoritative one.
///
/// One instance is shared by every request handler; all collaborators are
/// injected at construction so isolated unit tests run against independent
/// instances.
pub struct DriftTracker {
    cache: Arc<DriftCache>,
    lookup: Arc<dyn ConfigLookup>,
    fingerprint: Arc<dyn Fingerprint>,
    notifier: ChangeNotifier,
    lookup_timeout: Duration,
}

impl DriftTracker {
    pub fn new(
        settings: &Settings,
        lookup: Arc<dyn ConfigLookup>,
        fingerprint: Arc<dyn Fingerprint>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            cache: Arc::new(DriftCache::new(settings, lookup.clone(), fingerprint.clone())),
            lookup,
            fingerprint,
            notifier: ChangeNotifier::new(bus),
            lookup_timeout: Duration::from_millis(settings.lookup.request_timeout_in_ms),
        }
    }

    /// Has the client's applied configuration diverged from what this core
    /// last saw for it?
    ///
    /// The long-poll handler answers a poll immediately when this is true
    /// and holds the connection awaiting a change event otherwise. An
    /// unknown or never-resolved pair reads as stale on purpose: a spurious
    /// notification is preferable to a missed one.
    pub async fn is_stale(
        &self,
        group: &GroupKey,
        client: &str,
        reported_fingerprint: &str,
    ) -> Result<bool> {
        let cached = self.cache.fingerprint_or_populate(group, client).await?;
        Ok(cached.as_deref() != Some(reported_fingerprint))
    }

    /// Fingerprint of the authoritative configuration, straight from the
    /// store. Never touches the drift cache.
    pub async fn current_fingerprint(
        &self,
        group: &GroupKey,
    ) -> Result<String> {
        let found = find_bounded(self.lookup.as_ref(), group, self.lookup_timeout).await?;
        match found.filter(ConfigSnapshot::is_usable) {
            Some(snapshot) => Ok(self.fingerprint.compute(&snapshot)),
            None => Err(CacheError::NotFound {
                pool_id: group.pool_id.clone(),
                item_id: group.item_id.clone(),
                tenant_id: group.tenant_id.clone(),
            }
            .into()),
        }
    }

    /// Record that `client` now runs the configuration identified by
    /// `new_fingerprint`, and publish one change event.
    ///
    /// Idempotent: a repeated report of the fingerprint already on file is
    /// a no-op and publishes nothing. When the authoritative configuration
    /// cannot be re-fetched the entry is left untouched and no event is
    /// published (all-or-nothing).
    pub async fn apply_fingerprint(
        &self,
        group: &GroupKey,
        client: &str,
        new_fingerprint: &str,
    ) -> Result<()> {
        let composed = group.composed();
        let _guard = self.cache.lock_group(&composed).await;

        let entry = self.cache.get_or_create_entry(group, client);
        if entry.fingerprint.as_deref() == Some(new_fingerprint) {
            debug!(group = %composed, client, "fingerprint unchanged, skip");
            return Ok(());
        }

        let found = find_bounded(self.lookup.as_ref(), group, self.lookup_timeout).await?;
        let Some(snapshot) = found.filter(ConfigSnapshot::is_usable) else {
            return Err(CacheError::LookupFailure {
                group_key: composed,
            }
            .into());
        };

        self.cache.commit_entry(&composed, client, new_fingerprint, snapshot);
        self.notifier.notify_changed(client, &composed);
        Ok(())
    }

    /// All cached `(client, entry)` pairs whose group key contains `needle`.
    pub fn enumerate(
        &self,
        needle: &str,
    ) -> Vec<(String, CacheItem)> {
        self.cache.enumerate(needle)
    }

    /// Drop every cached group whose key contains `needle`; returns how
    /// many groups went away.
    pub fn invalidate(
        &self,
        needle: &str,
    ) -> usize {
        self.cache.invalidate(needle)
    }

    /// Shared handle to the underlying cache.
    pub fn cache(&self) -> Arc<DriftCache> {
        self.cache.clone()
    }
}
