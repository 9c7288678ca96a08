use std::sync::Arc;

use tracing::debug;

use crate::ConfigChangeEvent;
use crate::EventBus;
use crate::ServerEvent;
use crate::CHANGE_EVENTS_METRIC;

/// Publishes one change notification per detected drift.
pub struct ChangeNotifier {
    bus: Arc<dyn EventBus>,
}

impl ChangeNotifier {
    pub fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }

    pub(crate) fn notify_changed(
        &self,
        client: &str,
        group_key: &str,
    ) {
        debug!(client, group = group_key, "publishing config change event");
        CHANGE_EVENTS_METRIC.inc();
        self.bus.publish(ServerEvent::ConfigChange(ConfigChangeEvent {
            client: client.to_string(),
            group_key: group_key.to_string(),
        }));
    }
}
