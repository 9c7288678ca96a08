use std::time::{SystemTime, UNIX_EPOCH};

/// return millisecond
pub(crate) fn now_millis() -> u64 {
    let now = SystemTime::now();
    let since_epoch = now.duration_since(UNIX_EPOCH).expect("Time went backwards");
    since_epoch.as_millis() as u64
}
