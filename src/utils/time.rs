use std::time::SystemTime;
use std::time::UNIX_EPOCH;

/// Wall clock as milliseconds since the epoch; the timestamp stamped onto
/// transactions and heartbeat responses.
pub(crate) fn now_unix_ms() -> i64 {
    let now = SystemTime::now();
    let since_epoch = now.duration_since(UNIX_EPOCH).expect("Time went backwards");
    since_epoch.as_millis() as i64
}
