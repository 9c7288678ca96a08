use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;

lazy_static! {
    pub static ref CACHE_GROUPS_METRIC: IntGauge = IntGauge::new(
        "drift_cache_groups",
        "Number of resident config cache groups"
    )
    .expect("metric can not be created");

    pub static ref CACHE_POPULATED_METRIC: IntCounter = IntCounter::new(
        "drift_cache_populated_total",
        "Cache entries materialized on first client contact"
    )
    .expect("metric can not be created");

    pub static ref CHANGE_EVENTS_METRIC: IntCounter = IntCounter::new(
        "config_change_events_total",
        "Change notifications published to the event bus"
    )
    .expect("metric can not be created");

    pub static ref INVALIDATED_GROUPS_METRIC: IntCounter = IntCounter::new(
        "drift_cache_invalidated_groups_total",
        "Cache groups removed by invalidation"
    )
    .expect("metric can not be created");

    pub static ref LOOKUP_FAILURES_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("config_lookup_failures_total", "config_lookup_failures_total"),
        &["reason"]
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

pub fn register_custom_metrics() {
    REGISTRY
        .register(Box::new(CACHE_GROUPS_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(CACHE_POPULATED_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(CHANGE_EVENTS_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(INVALIDATED_GROUPS_METRIC.clone()))
        .expect("collector can be registered");
    REGISTRY
        .register(Box::new(LOOKUP_FAILURES_METRIC.clone()))
        .expect("collector can be registered");
}
