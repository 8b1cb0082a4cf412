//! Configuration for the coordination service.
//!
//! Hierarchical loading with:
//! - Default values as code base
//! - Configuration file support (`CONFIG_PATH`)
//! - Environment variable overrides (`ROOST__` prefix, highest priority)
//! - Component-wise validation

mod client;
mod limits;
mod server;
mod storage;

pub use client::*;
pub use limits::*;
pub use server::*;
pub use storage::*;


//---
use std::env;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;
use serde::Serialize;

use crate::Error;
use crate::Result;

/// Main configuration container for the coordination service.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RoostConfig {
    /// Listener and session-loop parameters.
    pub server: ServerConfig,
    /// Client library parameters.
    pub client: ClientConfig,
    /// Transaction log settings.
    pub storage: StorageConfig,
    /// Namespace limits.
    pub limits: LimitsConfig,
}

impl RoostConfig {
    /// Merge configuration sources, later sources overriding earlier ones:
    /// 1. Type defaults (lowest priority)
    /// 2. Configuration file from the `CONFIG_PATH` environment variable
    /// 3. Environment variables with the `ROOST__` prefix (highest priority)
    pub fn new() -> Result<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);

        if let Ok(config_path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&config_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("ROOST")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validates per-section rules plus the cross-component keepalive rule:
    /// the client heartbeat period must stay strictly below the server's
    /// stream idle threshold, or every quiet-but-healthy session would be
    /// torn down.
    pub fn validate(&self) -> Result<()> {
        self.server.validate()?;
        self.client.validate()?;
        self.storage.validate()?;
        self.limits.validate()?;

        if self.client.heartbeat_period_ms() >= self.server.stream_idle_timeout_ms {
            return Err(Error::Config(ConfigError::Message(format!(
                "client heartbeat period {}ms must be shorter than the server stream idle timeout {}ms",
                self.client.heartbeat_period_ms(),
                self.server.stream_idle_timeout_ms
            ))));
        }
        Ok(())
    }
}
