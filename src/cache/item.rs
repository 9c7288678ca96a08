use crate::utils::now_millis;
use crate::ConfigSnapshot;

/// One client's last-known applied configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheItem {
    /// Composed group key this entry belongs to
    pub group_key: String,
    /// Fingerprint of the configuration the client last applied.
    /// `None` only before the first successful lookup for the pair.
    pub fingerprint: Option<String>,
    /// Snapshot the fingerprint was taken from; present once `fingerprint` is
    pub config: Option<ConfigSnapshot>,
    pub last_modified_ms: u64,
}

impl CacheItem {
    pub(crate) fn empty(group_key: String) -> Self {
        Self {
            group_key,
            fingerprint: None,
            config: None,
            last_modified_ms: now_millis(),
        }
    }

    pub(crate) fn populated(
        group_key: String,
        fingerprint: String,
        config: ConfigSnapshot,
    ) -> Self {
        Self {
            group_key,
            fingerprint: Some(fingerprint),
            config: Some(config),
            last_modified_ms: now_millis(),
        }
    }
}
