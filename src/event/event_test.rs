use std::sync::Arc;

use crate::ChangeNotifier;
use crate::ChannelEventBus;
use crate::ConfigChangeEvent;
use crate::DeliveryClass;
use crate::EventBus;
use crate::ServerEvent;

/// # Case 1: A published event reaches the channel receiver intact
#[tokio::test]
async fn test_publish_case1() {
    let (bus, mut rx) = ChannelEventBus::new();

    bus.publish(ServerEvent::ConfigChange(ConfigChangeEvent {
        client: "10.0.0.5:8080".to_string(),
        group_key: "pool1+item1+tenantA".to_string(),
    }));

    let received = rx.recv().await.expect("should succeed");
    assert_eq!(
        received,
        ServerEvent::ConfigChange(ConfigChangeEvent {
            client: "10.0.0.5:8080".to_string(),
            group_key: "pool1+item1+tenantA".to_string(),
        })
    );
}

/// # Case 2: Publishing with every receiver gone is a silent drop
#[tokio::test]
async fn test_publish_case2() {
    let (bus, rx) = ChannelEventBus::new();
    drop(rx);

    bus.publish(ServerEvent::ConfigChange(ConfigChangeEvent {
        client: "10.0.0.5:8080".to_string(),
        group_key: "pool1+item1+tenantA".to_string(),
    }));
}

/// # Case 3: Change events declare the slow delivery class
#[test]
fn test_delivery_class_case3() {
    let event = ServerEvent::ConfigChange(ConfigChangeEvent {
        client: "10.0.0.5:8080".to_string(),
        group_key: "pool1+item1+tenantA".to_string(),
    });

    assert_eq!(event.delivery_class(), DeliveryClass::Slow);
}

/// # Case 4: The notifier carries (client, group) through to the bus
#[tokio::test]
async fn test_notify_changed_case4() {
    let (bus, mut rx) = ChannelEventBus::new();
    let notifier = ChangeNotifier::new(Arc::new(bus));

    notifier.notify_changed("192.168.20.227:8088", "pool1+item1+tenantA");

    match rx.recv().await.expect("should succeed") {
        ServerEvent::ConfigChange(change) => {
            assert_eq!(change.client, "192.168.20.227:8088");
            assert_eq!(change.group_key, "pool1+item1+tenantA");
        }
    }
}
