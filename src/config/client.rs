use std::time::Duration;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;
use crate::DEFAULT_CLIENT_IDLE_TIMEOUT_MS;
use crate::HEARTBEAT_DIVISOR;

/// Client library configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    /// Server endpoint the client dials.
    /// Default: http://127.0.0.1:8080
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// The client surfaces an idle-timeout error when the server has been
    /// silent for this long; a third of it is the outbound heartbeat period.
    /// Default: 3000ms
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            idle_timeout_ms: default_idle_timeout(),
        }
    }
}

impl ClientConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_millis(self.idle_timeout_ms)
    }

    /// Outbound silence longer than this triggers a heartbeat.
    pub fn heartbeat_period(&self) -> Duration {
        Duration::from_millis(self.heartbeat_period_ms())
    }

    pub(crate) fn heartbeat_period_ms(&self) -> u64 {
        self.idle_timeout_ms / u64::from(HEARTBEAT_DIVISOR)
    }

    pub fn validate(&self) -> Result<()> {
        if self.idle_timeout_ms < u64::from(HEARTBEAT_DIVISOR) {
            return Err(Error::Config(ConfigError::Message(format!(
                "Client idle timeout {}ms is too small to derive a heartbeat period",
                self.idle_timeout_ms
            ))));
        }
        Ok(())
    }
}

fn default_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}
fn default_idle_timeout() -> u64 {
    DEFAULT_CLIENT_IDLE_TIMEOUT_MS
}
