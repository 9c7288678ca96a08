use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::sync::MutexGuard;
use tracing::debug;
use tracing::info;

use crate::cache::matching_keys;
use crate::find_bounded;
use crate::CacheItem;
use crate::ConfigLookup;
use crate::ConfigSnapshot;
use crate::Fingerprint;
use crate::GroupKey;
use crate::Result;
use crate::Settings;
use crate::CACHE_GROUPS_METRIC;
use crate::CACHE_POPULATED_METRIC;
use crate::INVALIDATED_GROUPS_METRIC;

/// Concurrent store of every client's last-applied fingerprint.
///
/// Two-level map: composed group key -> (client address -> [`CacheItem`]).
/// A missing outer map and a missing inner key are the same thing, a cache
/// miss; concurrent removal may leave readers seeing either.
///
/// Populate-on-miss and in-place mutation for the same group serialize on a
/// striped lock keyed by the group identity, so at most one Config Lookup
/// call happens per pair under a concurrent first-access storm while
/// unrelated groups stay parallel. No stripe is ever held across a map
/// shard guard, and no shard guard is ever held across an await.
pub struct DriftCache {
    cache: DashMap<String, DashMap<String, CacheItem>>,
    stripes: Vec<Mutex<()>>,
    lookup: Arc<dyn ConfigLookup>,
    fingerprint: Arc<dyn Fingerprint>,
    lookup_timeout: Duration,
}

impl DriftCache {
    pub fn new(
        settings: &Settings,
        lookup: Arc<dyn ConfigLookup>,
        fingerprint: Arc<dyn Fingerprint>,
    ) -> Self {
        let stripe_count = settings.cache.lock_stripes.max(1);
        Self {
            cache: DashMap::new(),
            stripes: (0..stripe_count).map(|_| Mutex::new(())).collect(),
            lookup,
            fingerprint,
            lookup_timeout: Duration::from_millis(settings.lookup.request_timeout_in_ms),
        }
    }

    /// Cached fingerprint for the pair, populating lazily on first contact.
    ///
    /// Returns `Ok(None)` when nothing usable is known for the pair: either
    /// the store has no authoritative configuration (nothing is cached in
    /// that case), or the entry exists but has not seen a successful lookup
    /// yet. A failed or timed-out lookup call propagates as an error.
    pub async fn fingerprint_or_populate(
        &self,
        group: &GroupKey,
        client: &str,
    ) -> Result<Option<String>> {
        let composed = group.composed();

        // Fast path: lock-free read through the shard guards.
        if let Some(cached) = self.cached_fingerprint(&composed, client) {
            return Ok(cached);
        }

        let _guard = self.lock_group(&composed).await;

        // Re-check under the stripe: another caller may have populated the
        // pair while we waited.
        if let Some(cached) = self.cached_fingerprint(&composed, client) {
            return Ok(cached);
        }

        let found = find_bounded(self.lookup.as_ref(), group, self.lookup_timeout).await?;
        let Some(snapshot) = found.filter(ConfigSnapshot::is_usable) else {
            debug!(group = %composed, client, "authoritative config absent or incomplete, nothing cached");
            return Ok(None);
        };

        let fingerprint = self.fingerprint.compute(&snapshot);
        let item = CacheItem::populated(composed.clone(), fingerprint.clone(), snapshot);
        self.cache.entry(composed.clone()).or_default().insert(client.to_string(), item);

        CACHE_POPULATED_METRIC.inc();
        CACHE_GROUPS_METRIC.set(self.cache.len() as i64);
        debug!(group = %composed, client, "cache entry populated on first contact");

        Ok(Some(fingerprint))
    }

    /// Existing entry for the pair, or a fresh one with no fingerprint.
    ///
    /// The outer mapping is created atomically with the new inner entry as
    /// its sole member when the group was never seen before; an existing
    /// group gains the entry without disturbing other clients' entries.
    pub fn get_or_create_entry(
        &self,
        group: &GroupKey,
        client: &str,
    ) -> CacheItem {
        let composed = group.composed();
        let clients = self.cache.entry(composed.clone()).or_default();
        let item = clients
            .entry(client.to_string())
            .or_insert_with(|| CacheItem::empty(composed));
        item.value().clone()
    }

    /// Write the mutated fields as one unit, under the inner shard guard.
    ///
    /// Callers hold the group's stripe lock; a concurrent `invalidate` may
    /// still have removed the group, in which case there is nothing left to
    /// update and the write is dropped.
    pub(crate) fn commit_entry(
        &self,
        composed: &str,
        client: &str,
        fingerprint: &str,
        snapshot: ConfigSnapshot,
    ) {
        if let Some(clients) = self.cache.get(composed) {
            if let Some(mut item) = clients.get_mut(client) {
                item.fingerprint = Some(fingerprint.to_string());
                item.config = Some(snapshot);
                item.last_modified_ms = crate::utils::now_millis();
            }
        }
    }

    /// Union of all entries whose composed group key contains `needle`.
    ///
    /// Returned as `(client, entry)` pairs so one client address appearing
    /// under two matched groups cannot shadow an entry. Read-only and safe
    /// against concurrent mutation: a group removed mid-walk simply
    /// contributes nothing.
    pub fn enumerate(
        &self,
        needle: &str,
    ) -> Vec<(String, CacheItem)> {
        let mut entries = Vec::new();
        for key in self.matching_group_keys(needle) {
            if let Some(clients) = self.cache.get(&key) {
                for entry in clients.iter() {
                    entries.push((entry.key().clone(), entry.value().clone()));
                }
            }
        }
        entries
    }

    /// Remove every group whose composed key contains `needle`.
    ///
    /// Removal is coarse on purpose: an ambiguous needle takes every
    /// matching group with it, so callers must supply a sufficiently
    /// specific one. Returns the number of groups removed.
    pub fn invalidate(
        &self,
        needle: &str,
    ) -> usize {
        let mut removed = 0;
        for key in self.matching_group_keys(needle) {
            if let Some((group, clients)) = self.cache.remove(&key) {
                removed += 1;
                let addresses: Vec<String> = clients.iter().map(|entry| entry.key().clone()).collect();
                info!(group = %group, clients = ?addresses, "Remove invalidated config cache group");
            }
        }
        if removed > 0 {
            INVALIDATED_GROUPS_METRIC.inc_by(removed as u64);
            CACHE_GROUPS_METRIC.set(self.cache.len() as i64);
        }
        removed
    }

    /// Number of resident groups.
    pub fn group_count(&self) -> usize {
        self.cache.len()
    }

    pub(crate) async fn lock_group(
        &self,
        composed: &str,
    ) -> MutexGuard<'_, ()> {
        self.stripe(composed).lock().await
    }

    fn stripe(
        &self,
        composed: &str,
    ) -> &Mutex<()> {
        let mut hasher = DefaultHasher::new();
        composed.hash(&mut hasher);
        &self.stripes[(hasher.finish() as usize) % self.stripes.len()]
    }

    fn cached_fingerprint(
        &self,
        composed: &str,
        client: &str,
    ) -> Option<Option<String>> {
        let clients = self.cache.get(composed)?;
        let item = clients.get(client)?;
        Some(item.fingerprint.clone())
    }

    fn matching_group_keys(
        &self,
        needle: &str,
    ) -> Vec<String> {
        matching_keys(self.cache.iter().map(|entry| entry.key().clone()), needle)
    }
}
