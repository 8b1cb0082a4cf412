use std::net::IpAddr;
use std::net::Ipv4Addr;
use std::net::SocketAddr;
use std::path::PathBuf;

use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;
use crate::DEFAULT_LISTEN_PORT;
use crate::DEFAULT_STREAM_IDLE_TIMEOUT_MS;

/// Listener and per-session loop configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address the listener binds.
    /// Default: 0.0.0.0
    #[serde(default = "default_listen_ip")]
    pub listen_ip: IpAddr,

    /// TCP port of the listener.
    /// Default: 8080
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// A session with no event (request, watch delivery, or EOF) for this
    /// long is closed with a stream-idle failure.
    /// Default: 10000ms
    #[serde(default = "default_stream_idle_timeout")]
    pub stream_idle_timeout_ms: u64,

    /// Directory for the server log file.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_ip: default_listen_ip(),
            listen_port: default_listen_port(),
            stream_idle_timeout_ms: default_stream_idle_timeout(),
            log_dir: default_log_dir(),
        }
    }
}

impl ServerConfig {
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_ip, self.listen_port)
    }

    pub fn validate(&self) -> Result<()> {
        if self.stream_idle_timeout_ms == 0 {
            return Err(Error::Config(ConfigError::Message(
                "Stream idle timeout must be greater than 0".into(),
            )));
        }
        Ok(())
    }
}

fn default_listen_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}
fn default_listen_port() -> u16 {
    DEFAULT_LISTEN_PORT
}
fn default_stream_idle_timeout() -> u64 {
    DEFAULT_STREAM_IDLE_TIMEOUT_MS
}
fn default_log_dir() -> PathBuf {
    PathBuf::from("./logs")
}
