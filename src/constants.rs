/// Metadata key carrying the client-chosen session id on stream open.
/// tonic lowercases ASCII metadata keys, so the canonical `X-Client-ID`
/// spelling arrives as this.
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Default TCP port the coordination listener binds.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Server-side stream idle threshold: a session with no event for this long
/// is torn down.
pub const DEFAULT_STREAM_IDLE_TIMEOUT_MS: u64 = 10_000;

/// Client-side receive idle threshold.
pub const DEFAULT_CLIENT_IDLE_TIMEOUT_MS: u64 = 3_000;

/// The client emits a heartbeat after `idle_timeout / HEARTBEAT_DIVISOR` of
/// outbound silence. The resulting period must stay strictly below the
/// server's stream idle threshold.
pub const HEARTBEAT_DIVISOR: u32 = 3;

// -
// Transaction log file namespaces

/// Transaction log files are named `log_<zxid>` (decimal).
pub(crate) const TXN_LOG_FILE_PREFIX: &str = "log";

/// Reserved prefix for snapshot files sharing the log directory.
#[allow(dead_code)]
pub(crate) const SNAPSHOT_FILE_PREFIX: &str = "snapshot";

// -
// Channel sizing

/// Session event queues stay near-unbuffered so producers park until the
/// connection loop drains the previous event; the loop's idle timer measures
/// exactly that gap.
pub(crate) const SESSION_EVENT_QUEUE_CAPACITY: usize = 1;

/// Buffer between the connection loop and the HTTP/2 send path.
pub(crate) const STREAM_OUTBOUND_BUFFER: usize = 32;
