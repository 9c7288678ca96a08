use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::ConfigLookup;
use crate::ConfigSnapshot;
use crate::DriftCache;
use crate::EventBus;
use crate::LookupError;
use crate::ServerEvent;
use crate::Settings;
use crate::Sha256Fingerprint;

pub(crate) fn test_settings() -> Settings {
    Settings::default()
}

pub(crate) fn sample_snapshot(
    pool_id: &str,
    item_id: &str,
    tenant_id: &str,
) -> ConfigSnapshot {
    ConfigSnapshot {
        pool_id: pool_id.to_string(),
        item_id: item_id.to_string(),
        tenant_id: tenant_id.to_string(),
        core_size: 4,
        max_size: 8,
        queue_capacity: 1024,
        keep_alive_secs: 60,
        rejected_policy: "abort".to_string(),
    }
}

pub(crate) fn drift_cache(lookup: Arc<dyn ConfigLookup>) -> DriftCache {
    DriftCache::new(&test_settings(), lookup, Arc::new(Sha256Fingerprint))
}

pub(crate) enum LookupReply {
    /// Same answer for every query
    Fixed(Option<ConfigSnapshot>),
    /// Build a sample snapshot out of the queried identifiers
    Echo,
}

/// Lookup stub counting calls. The reply is switchable mid-test and an
/// optional artificial delay widens concurrency windows.
pub(crate) struct CountingLookup {
    calls: AtomicUsize,
    delay: Option<Duration>,
    reply: Mutex<LookupReply>,
}

impl CountingLookup {
    pub(crate) fn echoing() -> Arc<Self> {
        Self::build(LookupReply::Echo, None)
    }

    pub(crate) fn echoing_after(delay: Duration) -> Arc<Self> {
        Self::build(LookupReply::Echo, Some(delay))
    }

    pub(crate) fn returning(snapshot: Option<ConfigSnapshot>) -> Arc<Self> {
        Self::build(LookupReply::Fixed(snapshot), None)
    }

    pub(crate) fn set_reply(
        &self,
        reply: LookupReply,
    ) {
        *self.reply.lock().expect("should succeed") = reply;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn build(
        reply: LookupReply,
        delay: Option<Duration>,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            delay,
            reply: Mutex::new(reply),
        })
    }
}

#[async_trait]
impl ConfigLookup for CountingLookup {
    async fn find(
        &self,
        pool_id: &str,
        item_id: &str,
        tenant_id: &str,
    ) -> std::result::Result<Option<ConfigSnapshot>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let reply = match &*self.reply.lock().expect("should succeed") {
            LookupReply::Fixed(snapshot) => snapshot.clone(),
            LookupReply::Echo => Some(sample_snapshot(pool_id, item_id, tenant_id)),
        };
        Ok(reply)
    }
}

/// Bus capturing published events for assertions.
#[derive(Default)]
pub(crate) struct RecordingBus {
    events: Mutex<Vec<ServerEvent>>,
}

impl RecordingBus {
    pub(crate) fn events(&self) -> Vec<ServerEvent> {
        self.events.lock().expect("should succeed").clone()
    }
}

impl EventBus for RecordingBus {
    fn publish(
        &self,
        event: ServerEvent,
    ) {
        self.events.lock().expect("should succeed").push(event);
    }
}
