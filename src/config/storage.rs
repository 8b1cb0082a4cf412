use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::Result;

/// Transaction log settings. The engine runs correctly without a log
/// attached; the directory only needs to exist when one is configured.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct StorageConfig {
    /// Directory receiving one `log_<zxid>` file per mutation. `None`
    /// disables the write-ahead log.
    #[serde(default)]
    pub txn_log_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        // Existence of the directory is checked when the log is opened, so
        // that configs can be validated on machines that don't run a server.
        Ok(())
    }
}
